use std::fmt;

use url::Url;

use super::types::{PropertyDraft, PropertyPatch};

/// Limits applied to the image list of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLimits {
  pub max_images: usize,
  /// Maximum decoded size of an inline `data:` image, in bytes
  pub max_file_size: usize,
}

impl Default for ImageLimits {
  fn default() -> Self {
    Self {
      max_images: 6,
      max_file_size: 5 * 1024 * 1024,
    }
  }
}

/// Every problem found in a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub problems: Vec<String>,
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.problems.join("; "))
  }
}

impl std::error::Error for ValidationError {}

/// Which optional fields a validation pass looks at.
///
/// Title and location are always checked. An update only checks the optional
/// fields it changes, so records written before these checks existed stay
/// editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChecks {
  pub images: bool,
  pub map_url: bool,
  pub email: bool,
}

impl FieldChecks {
  pub const ALL: FieldChecks = FieldChecks {
    images: true,
    map_url: true,
    email: true,
  };
}

impl PropertyPatch {
  /// Checks covering exactly the fields this patch replaces.
  pub fn checks(&self) -> FieldChecks {
    FieldChecks {
      images: self.images.is_some(),
      map_url: self.map_url.is_some(),
      email: self.email.is_some(),
    }
  }
}

impl PropertyDraft {
  /// Check the draft before it becomes a record.
  pub fn validate(&self, limits: &ImageLimits) -> Result<(), ValidationError> {
    self.validate_only(FieldChecks::ALL, limits)
  }

  /// Check the required fields plus the optional ones selected by `checks`.
  pub fn validate_only(
    &self,
    checks: FieldChecks,
    limits: &ImageLimits,
  ) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    if self.title.trim().is_empty() {
      problems.push("title is required".to_string());
    }
    if self.location.trim().is_empty() {
      problems.push("location is required".to_string());
    }

    if checks.images {
      self.check_images(limits, &mut problems);
    }

    if checks.map_url {
      if let Some(map_url) = &self.map_url {
        match Url::parse(map_url.trim()) {
          Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
          _ => problems.push(format!("map link '{}' is not an http(s) URL", map_url)),
        }
      }
    }

    let email = self.email.trim();
    if checks.email && !email.is_empty() && !email.contains('@') {
      problems.push(format!("'{}' is not an email address", email));
    }

    if problems.is_empty() {
      Ok(())
    } else {
      Err(ValidationError { problems })
    }
  }

  fn check_images(&self, limits: &ImageLimits, problems: &mut Vec<String>) {
    if self.images.len() > limits.max_images {
      problems.push(format!(
        "at most {} images are allowed, got {}",
        limits.max_images,
        self.images.len()
      ));
    }
    for (i, image) in self.images.iter().enumerate() {
      if let Some(size) = inline_image_size(image) {
        if size > limits.max_file_size {
          problems.push(format!(
            "image {} is {} bytes, larger than the {} byte limit",
            i + 1,
            size,
            limits.max_file_size
          ));
        }
      }
    }
  }
}

/// Approximate decoded size of a base64 `data:` URI; `None` for other references.
fn inline_image_size(reference: &str) -> Option<usize> {
  let rest = reference.strip_prefix("data:")?;
  let (meta, payload) = rest.split_once(',')?;
  if meta.ends_with(";base64") {
    let padding = payload.chars().rev().take_while(|c| *c == '=').count();
    Some((payload.len() * 3 / 4).saturating_sub(padding))
  } else {
    Some(payload.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> PropertyDraft {
    PropertyDraft {
      title: "Lote A".to_string(),
      location: "Luque".to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn test_valid_minimal_draft() {
    assert!(draft().validate(&ImageLimits::default()).is_ok());
  }

  #[test]
  fn test_missing_required_fields_reported_together() {
    let d = PropertyDraft {
      title: "   ".to_string(),
      ..Default::default()
    };
    let err = d.validate(&ImageLimits::default()).unwrap_err();
    assert_eq!(err.problems.len(), 2);
    assert!(err.to_string().contains("title is required"));
    assert!(err.to_string().contains("location is required"));
  }

  #[test]
  fn test_too_many_images() {
    let mut d = draft();
    d.images = vec!["https://example.com/a.jpg".to_string(); 7];
    let err = d.validate(&ImageLimits::default()).unwrap_err();
    assert!(err.problems[0].contains("at most 6"));
  }

  #[test]
  fn test_inline_image_too_large() {
    let limits = ImageLimits {
      max_images: 6,
      max_file_size: 10,
    };
    let mut d = draft();
    d.images = vec![format!("data:image/png;base64,{}", "A".repeat(40))];
    assert!(d.validate(&limits).is_err());

    d.images = vec!["data:image/png;base64,AAAA".to_string()];
    assert!(d.validate(&limits).is_ok());
  }

  #[test]
  fn test_inline_image_size() {
    assert_eq!(inline_image_size("data:image/png;base64,AAAA"), Some(3));
    assert_eq!(inline_image_size("data:image/png;base64,AA=="), Some(1));
    assert_eq!(inline_image_size("https://example.com/a.jpg"), None);
  }

  #[test]
  fn test_map_url_must_be_http() {
    let mut d = draft();
    d.map_url = Some("https://maps.app.goo.gl/abc".to_string());
    assert!(d.validate(&ImageLimits::default()).is_ok());

    d.map_url = Some("not a url".to_string());
    assert!(d.validate(&ImageLimits::default()).is_err());

    d.map_url = Some("ftp://example.com/map".to_string());
    assert!(d.validate(&ImageLimits::default()).is_err());
  }

  #[test]
  fn test_email_needs_at_sign() {
    let mut d = draft();
    d.email = "ventas.example.com".to_string();
    assert!(d.validate(&ImageLimits::default()).is_err());

    d.email = "ventas@example.com".to_string();
    assert!(d.validate(&ImageLimits::default()).is_ok());
  }

  #[test]
  fn test_patch_checks_follow_changed_fields() {
    let patch = PropertyPatch {
      price: Some(1),
      ..Default::default()
    };
    assert_eq!(
      patch.checks(),
      FieldChecks {
        images: false,
        map_url: false,
        email: false,
      }
    );

    let patch = PropertyPatch {
      map_url: Some("x".to_string()),
      ..Default::default()
    };
    assert!(patch.checks().map_url);
    assert!(!patch.checks().email);
  }

  #[test]
  fn test_unchecked_legacy_fields_pass() {
    let mut d = draft();
    d.map_url = Some("maps.google.com/?q=Luque".to_string());
    d.email = "ventas".to_string();
    let price_only = PropertyPatch {
      price: Some(1),
      ..Default::default()
    };
    assert!(d.validate_only(price_only.checks(), &ImageLimits::default()).is_ok());
    assert!(d.validate(&ImageLimits::default()).is_err());

    d.title = String::new();
    let err = d
      .validate_only(price_only.checks(), &ImageLimits::default())
      .unwrap_err();
    assert_eq!(err.problems, vec!["title is required".to_string()]);
  }
}
