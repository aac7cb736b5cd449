//! Request validation.
//!
//! Every check here is pure and runs before a request is built, so a
//! malformed call never costs a round trip.

use crate::error::{Error, InvalidInputError};
use crate::types::{ApiSurface, ResourceKind};

use super::Payload;

/// Validate the parts of a request that are present.
pub fn request(
    surface: ApiSurface,
    kind: ResourceKind,
    identifier: Option<&str>,
    payload: Option<&Payload>,
) -> Result<(), Error> {
    self::kind(surface, kind)?;
    if let Some(identifier) = identifier {
        self::identifier(kind, identifier)?;
    }
    if let Some(payload) = payload {
        self::payload(kind, payload)?;
    }
    Ok(())
}

/// The kind must be exposed by the configured API surface.
pub fn kind(surface: ApiSurface, kind: ResourceKind) -> Result<(), Error> {
    if surface.supports(kind) {
        Ok(())
    } else {
        Err(InvalidInputError::Kind {
            kind: kind.to_string(),
            surface: surface.to_string(),
        }
        .into())
    }
}

/// Parse a kind name against the configured API surface.
pub fn kind_name(surface: ApiSurface, name: &str) -> Result<ResourceKind, Error> {
    let kind = name.parse::<ResourceKind>().map_err(|_| InvalidInputError::Kind {
        kind: name.to_string(),
        surface: surface.to_string(),
    })?;
    self::kind(surface, kind)?;
    Ok(kind)
}

/// The identifier must be exactly `kind.identifier_len()` hex characters.
pub fn identifier(kind: ResourceKind, value: &str) -> Result<(), Error> {
    let invalid = |reason: String| -> Error {
        InvalidInputError::Identifier {
            kind: kind.to_string(),
            value: value.to_string(),
            reason,
        }
        .into()
    };

    let expected = kind.identifier_len();
    if value.len() != expected {
        return Err(invalid(format!(
            "expected {} hex characters, got {}",
            expected,
            value.len()
        )));
    }

    if let Some(c) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(invalid(format!("contains non-hex character '{}'", c)));
    }

    Ok(())
}

/// Create and update payloads must carry at least one field.
pub fn payload(kind: ResourceKind, payload: &Payload) -> Result<(), Error> {
    if payload.is_empty() {
        return Err(InvalidInputError::EmptyPayload { kind }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UUID: &str = "0123456789abcdef0123456789abcdef";
    const TOKEN: &str = "0123456789abcdef";

    fn is_identifier_error(result: Result<(), Error>) -> bool {
        matches!(
            result,
            Err(Error::InvalidInput(InvalidInputError::Identifier { .. }))
        )
    }

    #[test]
    fn accepts_valid_identifiers_case_insensitively() {
        assert!(identifier(ResourceKind::Item, UUID).is_ok());
        assert!(identifier(ResourceKind::Item, &UUID.to_uppercase()).is_ok());
        assert!(identifier(ResourceKind::Token, TOKEN).is_ok());
        assert!(identifier(ResourceKind::Token, "ABCDEF0123456789").is_ok());
    }

    #[test]
    fn rejects_wrong_lengths() {
        for len in [0, 1, 15, 17, 31, 33, 64] {
            let value = "a".repeat(len);
            assert!(is_identifier_error(identifier(ResourceKind::Collection, &value)));
            if len != 16 {
                assert!(is_identifier_error(identifier(ResourceKind::Token, &value)));
            }
        }
        assert!(is_identifier_error(identifier(ResourceKind::Token, UUID)));
        assert!(is_identifier_error(identifier(ResourceKind::Image, TOKEN)));
    }

    #[test]
    fn rejects_non_hex_characters() {
        for bad in ['g', 'z', '-', ' ', '/', 'é'] {
            let mut value = UUID[..31].to_string();
            value.push(bad);
            assert!(is_identifier_error(identifier(ResourceKind::Item, &value)));
        }
    }

    #[test]
    fn kind_membership_depends_on_surface() {
        assert!(kind(ApiSurface::Craftar, ResourceKind::Bundle).is_ok());
        assert!(matches!(
            kind(ApiSurface::Catchoom, ResourceKind::Bundle),
            Err(Error::InvalidInput(InvalidInputError::Kind { .. }))
        ));
    }

    #[test]
    fn kind_names_are_exact_match() {
        assert_eq!(
            kind_name(ApiSurface::Craftar, "media").unwrap(),
            ResourceKind::Media
        );
        assert!(kind_name(ApiSurface::Craftar, "Media").is_err());
        assert!(kind_name(ApiSurface::Craftar, "widget").is_err());
        assert!(kind_name(ApiSurface::Catchoom, "version").is_err());
    }

    #[test]
    fn empty_payload_is_rejected() {
        let empty = Payload::new();
        assert!(matches!(
            payload(ResourceKind::Collection, &empty),
            Err(Error::InvalidInput(InvalidInputError::EmptyPayload { .. }))
        ));

        let mut body = Payload::new();
        body.insert("name".to_string(), json!("x"));
        assert!(payload(ResourceKind::Collection, &body).is_ok());
    }

    #[test]
    fn request_checks_every_present_part() {
        let mut body = Payload::new();
        body.insert("name".to_string(), json!("x"));

        assert!(request(ApiSurface::Craftar, ResourceKind::Item, Some(UUID), Some(&body)).is_ok());
        assert!(request(ApiSurface::Craftar, ResourceKind::Item, None, None).is_ok());
        assert!(request(ApiSurface::Craftar, ResourceKind::Item, Some("nope"), Some(&body)).is_err());
        assert!(
            request(ApiSurface::Craftar, ResourceKind::Item, Some(UUID), Some(&Payload::new()))
                .is_err()
        );
        assert!(request(ApiSurface::Catchoom, ResourceKind::Tag, None, None).is_err());
    }
}
