//! Messages exchanged between the UI layer and the controller.
//!
//! The UI owns every control. It reports what the user did as a [`UiEvent`]
//! and applies the returned [`UiCommand`]s in order.

use serde::{Deserialize, Serialize};

/// Something the user did in the registration dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum UiEvent {
    /// The customer name field now holds this text.
    CustomerNameChanged(String),
    /// The license key field now holds this text.
    LicenseKeyChanged(String),
    /// The proceed button was clicked.
    Proceed,
    /// The cancel button was clicked.
    Cancel,
    /// The "lost key" link was clicked.
    LostKey,
    /// The "buy online" link was clicked.
    BuyOnline,
    /// The app was opened through a quick-apply link.
    QuickApplyLinkOpened(String),
}

/// Something the UI layer must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "command",
    content = "value",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum UiCommand {
    SetGreeting(String),
    SetProceedEnabled(bool),
    ShowSpinner,
    HideSpinner,
    /// Show the message next to the input fields.
    ShowError(String),
    HideError,
    ShakeWindow,
    ClearInputFields,
    /// Replace both field contents, e.g. from a quick-apply link.
    FillInputFields {
        customer_name: String,
        license_key: String,
    },
    /// Open the URL in the user's browser.
    OpenUrl(String),
    CloseWindow,
    /// Registration succeeded; the host app should persist it.
    Registered { customer_name: String },
}
