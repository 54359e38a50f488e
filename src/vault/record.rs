//! Record types held in a vault.
//!
//! Field names serialize in camelCase and the password secret under the
//! key `password`, so blobs written by the browser client load unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::snapshot::VaultSnapshot;
use super::validate;
use crate::errors::{Result, SecuraError, ValidationError};
use crate::session::UserId;

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// The two lists a vault holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Passwords,
    Cards,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passwords => "passwords",
            Self::Cards => "cards",
        }
    }

    /// Singular noun for messages ("password", "card").
    pub fn noun(self) -> &'static str {
        match self {
            Self::Passwords => "password",
            Self::Cards => "card",
        }
    }

    /// On-device storage key: `secura_<kind>_<userId>`.
    pub fn storage_key(self, user: &UserId) -> String {
        format!("secura_{}_{}", self.as_str(), user)
    }

    /// Key inside the remote metadata bag.
    pub fn metadata_key(self) -> &'static str {
        match self {
            Self::Passwords => "secura_passwords",
            Self::Cards => "secura_cards",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = SecuraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "passwords" | "password" => Ok(Self::Passwords),
            "cards" | "card" => Ok(Self::Cards),
            other => Err(SecuraError::CommandFailed(format!(
                "unknown record kind '{other}' — use 'passwords' or 'cards'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Record trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every record kind.
///
/// The vault manager is generic over this trait, so each operation is
/// written once and the kind is picked by type (`add::<CardRecord>`).
pub trait Record: Clone + Serialize + DeserializeOwned {
    const KIND: RecordKind;

    /// User-supplied fields for a new record.
    type Draft;

    /// Partial update; `None` fields are left alone.
    type Patch;

    fn id(&self) -> &str;

    /// Build a record from a draft.  Does not validate.
    fn create(draft: Self::Draft, id: String, created_at: DateTime<Utc>) -> Self;

    /// Merge a patch into this record.  `id` and `created_at` never change.
    fn apply(&mut self, patch: Self::Patch);

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    /// Case-insensitive substring match; `needle` is already lowercase.
    fn matches(&self, needle: &str) -> bool;

    fn list(snapshot: &VaultSnapshot) -> &Vec<Self>;

    fn list_mut(snapshot: &mut VaultSnapshot) -> &mut Vec<Self>;
}

fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ---------------------------------------------------------------------------
// Passwords
// ---------------------------------------------------------------------------

/// A saved login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRecord {
    pub id: String,
    pub site_name: String,
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new password record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPassword {
    pub site_name: String,
    pub username: String,
    pub secret: String,
    pub url: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordPatch {
    pub site_name: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl Record for PasswordRecord {
    const KIND: RecordKind = RecordKind::Passwords;
    type Draft = NewPassword;
    type Patch = PasswordPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(draft: NewPassword, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            site_name: draft.site_name.trim().to_string(),
            username: draft.username.trim().to_string(),
            secret: draft.secret,
            url: draft.url.trim().to_string(),
            notes: draft.notes,
            created_at,
        }
    }

    fn apply(&mut self, patch: PasswordPatch) {
        if let Some(v) = patch.site_name {
            self.site_name = v.trim().to_string();
        }
        if let Some(v) = patch.username {
            self.username = v.trim().to_string();
        }
        if let Some(v) = patch.secret {
            self.secret = v;
        }
        if let Some(v) = patch.url {
            self.url = v.trim().to_string();
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::password(self)
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lower(&self.site_name, needle)
            || contains_lower(&self.username, needle)
            || contains_lower(&self.url, needle)
            || contains_lower(&self.notes, needle)
    }

    fn list(snapshot: &VaultSnapshot) -> &Vec<Self> {
        &snapshot.passwords
    }

    fn list_mut(snapshot: &mut VaultSnapshot) -> &mut Vec<Self> {
        &mut snapshot.passwords
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Card network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
    #[default]
    Other,
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Other => "other",
        }
    }

    /// Map free-form stored values onto a known type, falling back to
    /// `Other` instead of failing the whole blob.
    pub fn lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" | "master card" => Ok(Self::Mastercard),
            "amex" | "american express" => Ok(Self::Amex),
            "discover" => Ok(Self::Discover),
            "other" | "" => Ok(Self::Other),
            other => Err(ValidationError::UnknownCardType(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for CardType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::lenient(&raw))
    }
}

/// A saved payment card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub card_name: String,
    #[serde(default)]
    pub card_type: CardType,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new card record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    pub card_name: String,
    pub card_type: CardType,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub card_name: Option<String>,
    pub card_type: Option<CardType>,
    pub cardholder_name: Option<String>,
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
}

impl CardRecord {
    /// The card number with all but the last four digits replaced by `*`.
    pub fn masked_number(&self) -> String {
        let keep_from = self.card_number.chars().count().saturating_sub(4);
        self.card_number
            .chars()
            .enumerate()
            .map(|(i, c)| if i < keep_from && c.is_ascii_digit() { '*' } else { c })
            .collect()
    }
}

impl Record for CardRecord {
    const KIND: RecordKind = RecordKind::Cards;
    type Draft = NewCard;
    type Patch = CardPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(draft: NewCard, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            card_name: draft.card_name.trim().to_string(),
            card_type: draft.card_type,
            cardholder_name: draft.cardholder_name.trim().to_string(),
            card_number: validate::normalize_card_number(&draft.card_number),
            expiry_date: draft.expiry_date.trim().to_string(),
            cvv: draft.cvv.trim().to_string(),
            created_at,
        }
    }

    fn apply(&mut self, patch: CardPatch) {
        if let Some(v) = patch.card_name {
            self.card_name = v.trim().to_string();
        }
        if let Some(v) = patch.card_type {
            self.card_type = v;
        }
        if let Some(v) = patch.cardholder_name {
            self.cardholder_name = v.trim().to_string();
        }
        if let Some(v) = patch.card_number {
            self.card_number = validate::normalize_card_number(&v);
        }
        if let Some(v) = patch.expiry_date {
            self.expiry_date = v.trim().to_string();
        }
        if let Some(v) = patch.cvv {
            self.cvv = v.trim().to_string();
        }
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::card(self)
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lower(&self.card_name, needle)
            || contains_lower(&self.cardholder_name, needle)
            || self.card_type.as_str().contains(needle)
    }

    fn list(snapshot: &VaultSnapshot) -> &Vec<Self> {
        &snapshot.cards
    }

    fn list_mut(snapshot: &mut VaultSnapshot) -> &mut Vec<Self> {
        &mut snapshot.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> CardRecord {
        CardRecord::create(
            NewCard {
                card_name: "Main".into(),
                card_type: CardType::Visa,
                cardholder_name: "Ada Lovelace".into(),
                card_number: number.into(),
                expiry_date: "07/29".into(),
                cvv: "123".into(),
            },
            "c1".into(),
            Utc::now(),
        )
    }

    #[test]
    fn storage_key_format() {
        let user = UserId::parse("user_42").unwrap();
        assert_eq!(
            RecordKind::Passwords.storage_key(&user),
            "secura_passwords_user_42"
        );
        assert_eq!(
            RecordKind::Cards.storage_key(&UserId::Anonymous),
            "secura_cards_anonymous"
        );
    }

    #[test]
    fn password_serializes_with_browser_field_names() {
        let record = PasswordRecord::create(
            NewPassword {
                site_name: "GitHub".into(),
                username: "octo".into(),
                secret: "s3cret".into(),
                ..NewPassword::default()
            },
            "p1".into(),
            Utc::now(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["siteName"], "GitHub");
        assert_eq!(json["password"], "s3cret");
        assert!(json.get("secret").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn reads_browser_blob() {
        let raw = r#"[{"id":"abc","siteName":"Google","username":"me","password":"pw",
            "url":"https://google.com","notes":"","createdAt":"2024-05-01T10:00:00.000Z"}]"#;
        let parsed: Vec<PasswordRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed[0].site_name, "Google");
        assert_eq!(parsed[0].secret, "pw");
    }

    #[test]
    fn card_type_is_lenient_when_reading() {
        let raw = r#"{"id":"c","cardName":"x","cardType":"VISA","cardholderName":"y",
            "cardNumber":"4111111111111111","expiryDate":"01/30","cvv":"123",
            "createdAt":"2024-05-01T10:00:00Z"}"#;
        let parsed: CardRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.card_type, CardType::Visa);

        let odd = raw.replace("VISA", "diners");
        let parsed: CardRecord = serde_json::from_str(&odd).unwrap();
        assert_eq!(parsed.card_type, CardType::Other);
    }

    #[test]
    fn card_type_is_strict_from_cli() {
        assert!("diners".parse::<CardType>().is_err());
        assert_eq!("Amex".parse::<CardType>().unwrap(), CardType::Amex);
    }

    #[test]
    fn card_number_is_normalized_on_create() {
        assert_eq!(card("4111 1111-1111 1111").card_number, "4111111111111111");
    }

    #[test]
    fn masks_all_but_last_four() {
        assert_eq!(card("4111111111111234").masked_number(), "************1234");
    }

    #[test]
    fn apply_keeps_identity_fields() {
        let mut c = card("4111111111111111");
        let created = c.created_at;
        c.apply(CardPatch {
            card_name: Some("Travel".into()),
            ..CardPatch::default()
        });
        assert_eq!(c.id, "c1");
        assert_eq!(c.created_at, created);
        assert_eq!(c.card_name, "Travel");
    }

    #[test]
    fn card_search_covers_type() {
        let c = card("4111111111111111");
        assert!(c.matches("vis"));
        assert!(c.matches("lovelace"));
        assert!(!c.matches("4111"));
    }
}
