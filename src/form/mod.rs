//! Host-form side: the field binding, range controls and the vacancy form root.

pub mod binding;
pub mod controller;
pub mod surfaces;
pub mod vacancy;
pub mod values;

pub use binding::{BindingHandle, FieldBinding, FieldWatch, FormStore};
pub use controller::{Endpoint, RangeFieldController, RangeFieldSpec};
pub use surfaces::{
    ConfirmationSurface, ConfirmationTexts, Notice, NoticeLevel, NotificationSurface,
    PUBLISH_CONFIRMATION,
};
pub use vacancy::VacancyForm;
pub use values::{fields, VacancyFormValues};
