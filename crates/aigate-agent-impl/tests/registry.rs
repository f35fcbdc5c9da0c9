use aigate_agent_core::{AgentError, Language, Vendor};
use aigate_agent_impl::registry;
use aigate_common::Settings;

fn full_settings() -> Settings {
    Settings {
        openai_api_key: Some("sk-openai".to_string()),
        anthropic_api_key: Some("sk-ant".to_string()),
        google_api_key: Some("goog".to_string()),
        ..Settings::default()
    }
}

#[test]
fn builds_one_agent_per_vendor_and_family() {
    let settings = full_settings();
    for vendor in [Vendor::OpenAi, Vendor::Anthropic, Vendor::Google] {
        let agent = registry::text_agent(vendor, "", Language::default(), &settings).unwrap();
        assert_eq!(agent.name(), vendor.as_str());

        let agent = registry::vision_agent(vendor, "", "", Language::default(), &settings).unwrap();
        assert_eq!(agent.name(), vendor.as_str());
    }
    for vendor in [Vendor::OpenAi, Vendor::Google] {
        let agent =
            registry::transcribe_agent(vendor, "", "", Language::default(), &settings).unwrap();
        assert_eq!(agent.name(), vendor.as_str());
    }
}

#[test]
fn missing_credential_fails_construction_naming_the_variable() {
    let settings = Settings::default();
    let err = registry::text_agent(Vendor::OpenAi, "", Language::default(), &settings).unwrap_err();
    match err {
        AgentError::MissingCredential(name) => assert_eq!(name, "OPENAI_API_KEY"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err =
        registry::vision_agent(Vendor::Anthropic, "", "", Language::default(), &settings)
            .unwrap_err();
    assert!(matches!(
        err,
        AgentError::MissingCredential("ANTHROPIC_API_KEY")
    ));

    let err =
        registry::transcribe_agent(Vendor::Google, "", "", Language::default(), &settings)
            .unwrap_err();
    assert!(matches!(err, AgentError::MissingCredential("GOOGLE_API_KEY")));
}

#[test]
fn unknown_models_are_rejected() {
    let settings = full_settings();
    let err = registry::text_agent(Vendor::OpenAi, "gpt-2", Language::default(), &settings)
        .unwrap_err();
    assert!(matches!(err, AgentError::InputContract(_)));

    // Cross-vendor model names do not leak between catalogs.
    let err = registry::text_agent(
        Vendor::Anthropic,
        "gpt-4o-mini",
        Language::default(),
        &settings,
    )
    .unwrap_err();
    assert!(matches!(err, AgentError::InputContract(_)));
}

#[test]
fn explicit_model_names_are_honored() {
    let settings = full_settings();
    assert!(registry::text_agent(
        Vendor::Anthropic,
        "claude-sonnet-4-20250514",
        Language::EnUs,
        &settings
    )
    .is_ok());
    assert!(registry::transcribe_agent(
        Vendor::Google,
        "gemini-2.0-flash",
        "",
        Language::EnUs,
        &settings
    )
    .is_ok());
}

#[test]
fn anthropic_transcription_is_unsupported() {
    let err = registry::transcribe_agent(
        Vendor::Anthropic,
        "",
        "",
        Language::default(),
        &full_settings(),
    )
    .unwrap_err();
    assert!(matches!(err, AgentError::InputContract(_)));
}
