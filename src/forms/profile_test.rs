use super::*;

// =============================================================
// Field checks
// =============================================================

#[test]
fn bio_is_limited_to_five_hundred_characters() {
    assert_eq!(validate_bio(&"a".repeat(500)), Ok(()));
    assert_eq!(validate_bio(&"a".repeat(501)), Err(ValidationError::BioTooLong));
    assert_eq!(ValidationError::BioTooLong.to_string(), "Bio cannot exceed 500 characters");
}

#[test]
fn bio_limit_counts_characters_not_bytes() {
    assert_eq!(validate_bio(&"é".repeat(500)), Ok(()));
}

#[test]
fn website_must_be_absolute_url() {
    assert_eq!(validate_website(""), Ok(()));
    assert_eq!(validate_website("https://ada.dev"), Ok(()));
    assert_eq!(validate_website("ada.dev"), Err(ValidationError::InvalidUrl));
    assert_eq!(ValidationError::InvalidUrl.to_string(), "Please enter a valid URL");
}

#[test]
fn field_errors_collects_every_failure() {
    let form = ProfileForm { bio: "x".repeat(600), website: "not a url".into(), ..ProfileForm::default() };

    let errors = form.field_errors();

    assert_eq!(
        errors,
        vec![("bio", ValidationError::BioTooLong), ("website", ValidationError::InvalidUrl)]
    );
}

#[test]
fn validate_leaves_blank_fields_out() {
    let form = ProfileForm { bio: "Printer".into(), first_name: "  ".into(), ..ProfileForm::default() };

    let update = form.validate().unwrap();

    assert_eq!(update.bio.as_deref(), Some("Printer"));
    assert_eq!(update.first_name, None);
    assert_eq!(update.website, None);
}

#[test]
fn validate_rejects_malformed_email() {
    let form = ProfileForm { email: "ada@".into(), ..ProfileForm::default() };

    assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidEmail);
}

// =============================================================
// Social links
// =============================================================

#[test]
fn parse_links_skips_blank_lines() {
    let links = parse_links("https://github.com/ada\n\n  \n https://x.com/ada \n");

    assert_eq!(links, vec!["https://github.com/ada", "https://x.com/ada"]);
}

#[test]
fn platforms_are_detected_from_link_text() {
    assert_eq!(Platform::detect("https://x.com/ada"), Platform::Twitter);
    assert_eq!(Platform::detect("https://Twitter.com/ada"), Platform::Twitter);
    assert_eq!(Platform::detect("https://youtu.be/abc"), Platform::YouTube);
    assert_eq!(Platform::detect("https://www.linkedin.com/in/ada"), Platform::LinkedIn);
    assert_eq!(Platform::detect("https://github.com/ada"), Platform::GitHub);
    assert_eq!(Platform::detect("https://twitch.tv/ada"), Platform::Twitch);
    assert_eq!(Platform::detect("https://ada.dev"), Platform::Website);
}

#[test]
fn platform_names_match_display() {
    assert_eq!(Platform::GitHub.to_string(), "GitHub");
    assert_eq!(Platform::TikTok.name(), "TikTok");
}

#[test]
fn link_domain_strips_www_and_assumes_https() {
    assert_eq!(link_domain("https://www.behance.net/ada"), "behance.net");
    assert_eq!(link_domain("dribbble.com/ada"), "dribbble.com");
}
