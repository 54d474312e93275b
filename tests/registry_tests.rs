use sowa_cli::config::{profile_for, profile_for_id, ConfigError, Field, Provider, RequirementProfile};

// ── profile_for ───────────────────────────────────────────────────────────────

#[test]
fn cloud_providers_need_only_a_key() {
    for p in [Provider::OpenAI, Provider::Anthropic, Provider::Google] {
        assert_eq!(
            profile_for(p),
            RequirementProfile { key_required: true, needs_base_url: false, needs_model_name: false }
        );
    }
}

#[test]
fn local_key_is_optional_but_endpoint_is_required() {
    let profile = profile_for(Provider::Local);
    assert!(!profile.key_required);
    assert!(profile.needs_base_url);
    assert!(profile.needs_model_name);
    assert!(profile.uses(Field::ApiKey));
    assert!(!profile.requires(Field::ApiKey));
}

#[test]
fn openai_compatible_needs_everything() {
    let profile = profile_for(Provider::OpenAICompatible);
    for field in Field::all() {
        assert!(profile.requires(field), "{field} should be required");
    }
}

#[test]
fn visible_fields_follow_profile() {
    assert_eq!(Provider::OpenAI.profile().visible_fields(), vec![Field::ApiKey]);
    assert_eq!(
        Provider::Local.profile().visible_fields(),
        vec![Field::BaseUrl, Field::ModelName, Field::ApiKey]
    );
}

// ── identifiers ───────────────────────────────────────────────────────────────

#[test]
fn identifiers_round_trip() {
    for p in Provider::all() {
        assert_eq!(p.as_str().parse::<Provider>().unwrap(), p);
        assert_eq!(p.to_string(), p.as_str());
    }
}

#[test]
fn openai_compatible_identifier() {
    assert_eq!(Provider::OpenAICompatible.as_str(), "openai-compatible");
}

#[test]
fn unknown_identifier_is_rejected() {
    let err = "cohere".parse::<Provider>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownProviderKind(ref id) if id == "cohere"));
    assert!(profile_for_id("OpenAI").is_err());
}

#[test]
fn profile_for_id_matches_enum_lookup() {
    assert_eq!(profile_for_id("local").unwrap(), profile_for(Provider::Local));
}

#[test]
fn default_provider_is_openai() {
    assert_eq!(Provider::default(), Provider::OpenAI);
}

// ── Provider::all / labels ────────────────────────────────────────────────────

#[test]
fn provider_all_returns_five_in_menu_order() {
    assert_eq!(
        Provider::all(),
        vec![
            Provider::OpenAI,
            Provider::OpenAICompatible,
            Provider::Anthropic,
            Provider::Google,
            Provider::Local,
        ]
    );
}

#[test]
fn provider_labels() {
    assert_eq!(Provider::Google.label(), "Google Gemini");
    assert_eq!(Provider::OpenAICompatible.label(), "OpenAI Compatible LLM");
}

#[test]
fn local_key_field_has_its_own_label() {
    assert_eq!(Provider::Local.api_key_label(), "Local Model Endpoint/Key (if applicable)");
    assert_eq!(Provider::Anthropic.api_key_label(), "Your LLM API Key");
}

#[test]
fn key_placeholders_match_vendor_prefixes() {
    assert!(Provider::Anthropic.api_key_placeholder().starts_with("sk-ant-"));
    assert!(Provider::Google.api_key_placeholder().starts_with("AIza"));
    assert!(Provider::OpenAICompatible.api_key_placeholder().starts_with("sk-"));
}
