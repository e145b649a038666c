//! User-facing message table.

use std::str::FromStr;

use crate::models::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" | "es_es" => Ok(Locale::Es),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Locale::En),
            other => Err(UnknownVariant::new("locale", other)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Es => write!(f, "es"),
            Locale::En => write!(f, "en"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn session_expired(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Sesión expirada o no autorizada",
            Locale::En => "Session expired or unauthorized",
        }
    }

    pub fn server_error(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Error del servidor. Inténtalo de nuevo más tarde",
            Locale::En => "Server error. Please try again later",
        }
    }

    pub fn credential_unreadable(&self) -> &'static str {
        match self.locale {
            Locale::Es => "No se pudo leer la sesión almacenada",
            Locale::En => "Could not read the stored session",
        }
    }

    pub fn generic_failure(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Ocurrió un error al procesar la solicitud",
            Locale::En => "An error occurred while processing the request",
        }
    }

    pub fn passwords_do_not_match(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Las contraseñas no coinciden",
            Locale::En => "Passwords do not match",
        }
    }

    pub fn password_too_short(&self) -> &'static str {
        match self.locale {
            Locale::Es => "La contraseña debe tener un mínimo de 8 caracteres",
            Locale::En => "Password must be a minimum of 8 characters",
        }
    }

    pub fn invalid_email(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Correo electrónico inválido",
            Locale::En => "Invalid email address",
        }
    }

    pub fn password_required(&self) -> &'static str {
        match self.locale {
            Locale::Es => "La contraseña es obligatoria",
            Locale::En => "Password is required",
        }
    }

    pub fn reset_token_missing(&self) -> &'static str {
        match self.locale {
            Locale::Es => "El enlace de restablecimiento no es válido",
            Locale::En => "The reset link is not valid",
        }
    }

    pub fn reset_link_sent(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Si el correo existe, recibirás un enlace para restablecer la contraseña",
            Locale::En => "If the email exists, you will receive a password reset link",
        }
    }

    pub fn password_reset_done(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Contraseña restablecida correctamente",
            Locale::En => "Password reset successfully",
        }
    }

    pub fn notification_deleted(&self) -> &'static str {
        match self.locale {
            Locale::Es => "Notificación eliminada",
            Locale::En => "Notification deleted",
        }
    }

    pub fn marked_all_read(&self, count: u64) -> String {
        match self.locale {
            Locale::Es => format!("{} notificaciones marcadas como leídas", count),
            Locale::En => format!("{} notifications marked as read", count),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
