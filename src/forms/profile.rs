//! Profile edit form, plus the social-link helpers used to display a profile.

use std::fmt;

use crate::net::types::{FileUpload, ProfileUpdate};

use super::{MAX_BIO_LEN, ValidationError, optional, validate_email};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
    pub website: String,
    /// One link per line.
    pub social_media_links: String,
    pub profile_picture: Option<FileUpload>,
}

impl ProfileForm {
    /// Every failing field with its error, in form order. Empty when valid.
    #[must_use]
    pub fn field_errors(&self) -> Vec<(&'static str, ValidationError)> {
        let mut errors = Vec::new();
        if !self.email.trim().is_empty() {
            if let Err(e) = validate_email(&self.email) {
                errors.push(("email", e));
            }
        }
        if let Err(e) = validate_bio(&self.bio) {
            errors.push(("bio", e));
        }
        if let Err(e) = validate_website(&self.website) {
            errors.push(("website", e));
        }
        errors
    }

    /// Build the multipart update; blank fields are left out.
    ///
    /// # Errors
    ///
    /// Returns the first entry of [`ProfileForm::field_errors`].
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationError> {
        if let Some((_, e)) = self.field_errors().into_iter().next() {
            return Err(e);
        }
        Ok(ProfileUpdate {
            first_name: optional(&self.first_name),
            last_name: optional(&self.last_name),
            email: optional(&self.email),
            bio: optional(&self.bio),
            website: optional(&self.website),
            social_media_links: optional(&self.social_media_links),
            profile_picture: self.profile_picture.clone(),
        })
    }
}

/// # Errors
///
/// [`ValidationError::BioTooLong`] past the character limit.
pub fn validate_bio(bio: &str) -> Result<(), ValidationError> {
    if bio.chars().count() > MAX_BIO_LEN {
        return Err(ValidationError::BioTooLong);
    }
    Ok(())
}

/// Blank is accepted; anything else must parse as an absolute URL.
///
/// # Errors
///
/// [`ValidationError::InvalidUrl`] otherwise.
pub fn validate_website(website: &str) -> Result<(), ValidationError> {
    let website = website.trim();
    if website.is_empty() {
        return Ok(());
    }
    url::Url::parse(website)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl)
}

// =============================================================================
// SOCIAL LINKS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    LinkedIn,
    GitHub,
    YouTube,
    Dribbble,
    Behance,
    Medium,
    Pinterest,
    TikTok,
    Reddit,
    Tumblr,
    Flickr,
    Vimeo,
    Twitch,
    Website,
}

/// Substrings identifying each platform, checked in order.
const PLATFORM_MARKERS: [(Platform, &[&str]); 16] = [
    (Platform::Twitter, &["twitter", "x.com"]),
    (Platform::Facebook, &["facebook", "fb.com"]),
    (Platform::Instagram, &["instagram", "ig."]),
    (Platform::LinkedIn, &["linkedin"]),
    (Platform::GitHub, &["github"]),
    (Platform::YouTube, &["youtube", "youtu.be"]),
    (Platform::Dribbble, &["dribbble"]),
    (Platform::Behance, &["behance"]),
    (Platform::Medium, &["medium"]),
    (Platform::Pinterest, &["pinterest"]),
    (Platform::TikTok, &["tiktok"]),
    (Platform::Reddit, &["reddit"]),
    (Platform::Tumblr, &["tumblr"]),
    (Platform::Flickr, &["flickr"]),
    (Platform::Vimeo, &["vimeo"]),
    (Platform::Twitch, &["twitch"]),
];

impl Platform {
    #[must_use]
    pub fn detect(link: &str) -> Self {
        let link = link.to_lowercase();
        PLATFORM_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| link.contains(m)))
            .map_or(Self::Website, |(platform, _)| *platform)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::LinkedIn => "LinkedIn",
            Self::GitHub => "GitHub",
            Self::YouTube => "YouTube",
            Self::Dribbble => "Dribbble",
            Self::Behance => "Behance",
            Self::Medium => "Medium",
            Self::Pinterest => "Pinterest",
            Self::TikTok => "TikTok",
            Self::Reddit => "Reddit",
            Self::Tumblr => "Tumblr",
            Self::Flickr => "Flickr",
            Self::Vimeo => "Vimeo",
            Self::Twitch => "Twitch",
            Self::Website => "Website",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-blank lines of a newline-separated link list, trimmed.
#[must_use]
pub fn parse_links(links: &str) -> Vec<&str> {
    links
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Host of `link` without a leading `www.`; `https://` is assumed when no
/// scheme is given. Unparseable input comes back unchanged.
#[must_use]
pub fn link_domain(link: &str) -> String {
    let candidate = if link.starts_with("http") { link.to_owned() } else { format!("https://{link}") };
    url::Url::parse(&candidate)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_owned()))
        .unwrap_or_else(|| link.to_owned())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
