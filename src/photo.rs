use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

pub const MIN_PHOTO_BYTES: usize = 20 * 1024;
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

const SUPPORTED_MIME: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub mime: Option<String>,
    pub byte_len: usize,
}

/// Checks a `data:image/...;base64,` payload before it is sent for analysis.
pub fn validate_photo(data_url: &str) -> PhotoValidation {
    let mut issues = Vec::new();

    let Some((header, payload)) = data_url.trim().split_once(',') else {
        return invalid("Photo illisible - format data URL attendu");
    };
    let Some(meta) = header.strip_prefix("data:") else {
        return invalid("Photo illisible - format data URL attendu");
    };
    let Some(mime) = meta.strip_suffix(";base64") else {
        return invalid("Photo illisible - encodage base64 attendu");
    };
    let mime = mime.to_lowercase();
    if !SUPPORTED_MIME.contains(&mime.as_str()) {
        issues.push("Format non supporté - utilisez JPEG, PNG ou WebP".to_string());
    }

    let byte_len = match STANDARD.decode(payload.trim()) {
        Ok(bytes) => {
            if bytes.len() < MIN_PHOTO_BYTES {
                issues.push("Résolution trop faible - rapprochez-vous".to_string());
            }
            if bytes.len() > MAX_PHOTO_BYTES {
                issues.push("Photo trop lourde - 10 Mo maximum".to_string());
            }
            bytes.len()
        }
        Err(_) => {
            issues.push("Photo corrompue - données base64 invalides".to_string());
            0
        }
    };

    PhotoValidation {
        is_valid: issues.is_empty(),
        issues,
        mime: Some(mime),
        byte_len,
    }
}

fn invalid(issue: &str) -> PhotoValidation {
    PhotoValidation {
        is_valid: false,
        issues: vec![issue.to_string()],
        mime: None,
        byte_len: 0,
    }
}
