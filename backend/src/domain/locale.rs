//! Display-locale selection and the localized login wording.
//!
//! The portal records a three-way locale choice in its own cookie. It affects
//! the login [`MessageSet`] only; gateway behaviour is locale-independent.

use serde::{Deserialize, Serialize};

use super::error::MessageSet;

/// Cookie recording the guardian's display-language choice.
pub const LOCALE_COOKIE: &str = "locale";

/// Supported display locales. Arabic is the portal's primary language and the
/// default when the cookie is absent or unrecognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    Fr,
    En,
}

impl Locale {
    /// Parse the locale cookie value, falling back to Arabic.
    pub fn from_cookie(value: &str) -> Self {
        match value {
            "fr" => Self::Fr,
            "en" => Self::En,
            _ => Self::Ar,
        }
    }

    /// Login-specific wording for this locale.
    pub fn login_messages(self) -> &'static MessageSet {
        match self {
            Self::Ar => &LOGIN_AR,
            Self::Fr => &LOGIN_FR,
            Self::En => &LOGIN_EN,
        }
    }
}

static LOGIN_AR: MessageSet = MessageSet {
    connection_failed: "حدث خطأ في الاتصال",
    not_found: "المستخدم غير موجود. تأكد من رقم الهوية.",
    unauthorized: "كلمة المرور غير صحيحة.",
    fallback: "فشل تسجيل الدخول",
};

static LOGIN_FR: MessageSet = MessageSet {
    connection_failed: "Une erreur de connexion est survenue",
    not_found: "Utilisateur introuvable. Vérifiez le numéro de CIN.",
    unauthorized: "Mot de passe incorrect.",
    fallback: "Échec de la connexion",
};

static LOGIN_EN: MessageSet = MessageSet {
    connection_failed: "A connection error occurred",
    not_found: "Account not found. Check the CIN number.",
    unauthorized: "Incorrect password.",
    fallback: "Login failed",
};
