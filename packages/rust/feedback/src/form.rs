//! Feedback form model, sanitization and validation.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use sheetsite_shared::{Result, SheetsiteError};

/// Largest attachment the endpoint accepts (1 MB).
pub const MAX_ATTACHMENT_BYTES: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Anything that is not a letter (Spanish accents included) or whitespace.
static NOT_LETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-ZÁÉÍÓÚáéíóúÑñüÜ\s]").expect("letters regex")
});

/// Anything that is not a digit or `+`.
static NOT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+]").expect("phone regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Keep only letters and whitespace.
pub fn only_letters(value: &str) -> String {
    NOT_LETTER_RE.replace_all(value, "").into_owned()
}

/// Keep only digits and `+`.
pub fn only_phone_chars(value: &str) -> String {
    NOT_PHONE_RE.replace_all(value, "").into_owned()
}

// ---------------------------------------------------------------------------
// FeedbackForm
// ---------------------------------------------------------------------------

/// A citizen message for the feedback mailbox. Every text field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub name: String,
    /// Canton / province the sender writes from.
    pub region: String,
    pub email: String,
    /// WhatsApp number.
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl FeedbackForm {
    /// Apply the per-field character filters the form enforces on input.
    pub fn sanitized(&self) -> Self {
        Self {
            name: only_letters(&self.name),
            region: only_letters(&self.region),
            email: self.email.trim().to_string(),
            phone: only_phone_chars(&self.phone),
            subject: self.subject.clone(),
            message: self.message.clone(),
            attachment: self.attachment.clone(),
        }
    }

    /// Check required fields and the email shape.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("region", &self.region),
            ("email", &self.email),
            ("phone", &self.phone),
            ("subject", &self.subject),
            ("message", &self.message),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(SheetsiteError::validation(format!(
                "all fields are required; missing: {}",
                missing.join(", ")
            )));
        }

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(SheetsiteError::validation(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// Accepted attachment formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Jpeg,
    Png,
    Pdf,
}

impl AttachmentKind {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    /// Look up a kind from a MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Look up a kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// A validated file attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    kind: AttachmentKind,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Validate an in-memory file against the type and size limits.
    pub fn new(file_name: impl Into<String>, mime: &str, bytes: Vec<u8>) -> Result<Self> {
        let kind = AttachmentKind::from_mime(mime).ok_or_else(|| {
            SheetsiteError::validation("only JPG/PNG images or PDF files are allowed")
        })?;
        Self::checked(file_name.into(), kind, bytes)
    }

    /// Read and validate a file from disk; the type comes from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let kind = AttachmentKind::from_path(path).ok_or_else(|| {
            SheetsiteError::validation("only JPG/PNG images or PDF files are allowed")
        })?;

        // Reject on metadata before reading a large file into memory.
        let meta = std::fs::metadata(path).map_err(|e| SheetsiteError::io(path, e))?;
        if meta.len() > MAX_ATTACHMENT_BYTES as u64 {
            return Err(too_large(meta.len() as usize));
        }

        let bytes = std::fs::read(path).map_err(|e| SheetsiteError::io(path, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archivo".into());

        Self::checked(file_name, kind, bytes)
    }

    fn checked(file_name: String, kind: AttachmentKind, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(too_large(bytes.len()));
        }
        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn too_large(len: usize) -> SheetsiteError {
    SheetsiteError::validation(format!(
        "attachment is {len} bytes, the limit is 1MB ({MAX_ATTACHMENT_BYTES} bytes)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> FeedbackForm {
        FeedbackForm {
            name: "María José".into(),
            region: "Portoviejo, Manabí".into(),
            email: "maria@example.com".into(),
            phone: "+593 99-123-4567".into(),
            subject: "Alumbrado".into(),
            message: "Faltan luminarias en mi barrio.".into(),
            attachment: None,
        }
    }

    #[test]
    fn sanitizers_strip_disallowed_chars() {
        assert_eq!(only_letters("Ñandú 2024!"), "Ñandú ");
        assert_eq!(only_letters("Portoviejo, Manabí"), "Portoviejo Manabí");
        assert_eq!(only_phone_chars("+593 (99) 123-4567"), "+593991234567");
    }

    #[test]
    fn sanitized_form_validates() {
        let form = complete_form().sanitized();
        assert_eq!(form.region, "Portoviejo Manabí");
        assert_eq!(form.phone, "+593991234567");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_listed() {
        let mut form = complete_form();
        form.subject = "  ".into();
        form.phone = String::new();
        let err = form.validate().unwrap_err().to_string();
        assert!(err.contains("phone"));
        assert!(err.contains("subject"));
        assert!(!err.contains("name"));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut form = complete_form();
        form.email = "maria.example.com".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn attachment_type_and_size_limits() {
        assert!(Attachment::new("foto.jpg", "image/jpeg", vec![0; 10]).is_ok());
        assert!(Attachment::new("doc.pdf", "application/pdf", vec![0; MAX_ATTACHMENT_BYTES]).is_ok());

        let err = Attachment::new("gif.gif", "image/gif", vec![0; 10]).unwrap_err();
        assert!(err.to_string().contains("JPG/PNG"));

        let err = Attachment::new("big.png", "image/png", vec![0; MAX_ATTACHMENT_BYTES + 1])
            .unwrap_err();
        assert!(err.to_string().contains("1MB"));
    }

    #[test]
    fn attachment_from_path_uses_extension() {
        let dir = std::env::temp_dir().join(format!("sheetsite-attach-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let pdf = dir.join("denuncia.PDF");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        let attachment = Attachment::from_path(&pdf).expect("pdf attachment");
        assert_eq!(attachment.kind(), AttachmentKind::Pdf);
        assert_eq!(attachment.file_name(), "denuncia.PDF");

        let txt = dir.join("nota.txt");
        std::fs::write(&txt, b"hola").unwrap();
        assert!(Attachment::from_path(&txt).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
