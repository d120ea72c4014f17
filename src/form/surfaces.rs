/// Static texts of a yes/no confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationTexts {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cancel: &'static str,
    pub confirm: &'static str,
}

pub const PUBLISH_CONFIRMATION: ConfirmationTexts = ConfirmationTexts {
    title: "Publicar vacante",
    subtitle: "¿Estas seguro de querer publicar la vacante esta pasara a estado de revision una vez que confirmes?",
    cancel: "Cancelar",
    confirm: "Aceptar",
};

pub const REJECTED_NOTICE_TITLE: &str = "Petición incorrecta";
pub const FAILURE_NOTICE_TITLE: &str = "Error";
pub const SUCCESS_NOTICE_TITLE: &str = "Vacante publicada";
pub const SUCCESS_NOTICE_MESSAGE: &str = "La vacante pasó a estado de revisión";

/// Asks the user to accept or decline an action.
pub trait ConfirmationSurface {
    fn ask(&mut self, texts: &ConfirmationTexts) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait NotificationSurface {
    fn notify(&mut self, notice: &Notice);
}
