//! Serial entry dialog controller.
//!
//! Receives [`UiEvent`]s carrying field contents, runs them through the
//! [`LicenseValidator`], and answers with the [`UiCommand`]s the UI should
//! apply. The controller keeps its own copy of the field contents and never
//! touches a control directly.

use crate::command::{UiCommand, UiEvent};
use crate::config::RegistrationConfig;
use crate::error::RegistrationResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use watchdog_license::{LicenseValidator, RegistrationRequest, SerialScheme};

/// Whether this copy of the application is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RegistrationState {
    #[default]
    Unregistered,
    Registered {
        /// Name the accepted serial was issued to.
        customer_name: String,
    },
}

impl RegistrationState {
    /// Returns true once a serial has been accepted.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

/// Drives the serial entry dialog.
pub struct RegistrationController<S> {
    config: RegistrationConfig,
    validator: LicenseValidator<S>,
    fields: RegistrationRequest,
    proceed_enabled: bool,
    error_visible: bool,
    state: RegistrationState,
}

impl<S: SerialScheme> RegistrationController<S> {
    /// Creates a controller for an unregistered copy.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`RegistrationConfig::validate`].
    pub fn new(config: RegistrationConfig, scheme: S) -> RegistrationResult<Self> {
        config.validate()?;
        let validator = LicenseValidator::new(config.bundle_name.clone(), scheme);
        Ok(Self {
            config,
            validator,
            fields: RegistrationRequest::new("", ""),
            proceed_enabled: false,
            error_visible: false,
            state: RegistrationState::Unregistered,
        })
    }

    /// Creates a controller for a copy already registered to `customer_name`.
    ///
    /// # Errors
    ///
    /// As [`Self::new`].
    pub fn registered(
        config: RegistrationConfig,
        scheme: S,
        customer_name: impl Into<String>,
    ) -> RegistrationResult<Self> {
        let mut controller = Self::new(config, scheme)?;
        controller.state = RegistrationState::Registered {
            customer_name: customer_name.into(),
        };
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    #[must_use]
    pub fn validator(&self) -> &LicenseValidator<S> {
        &self.validator
    }

    #[must_use]
    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// Returns the controller's copy of the input fields.
    #[must_use]
    pub fn fields(&self) -> &RegistrationRequest {
        &self.fields
    }

    #[must_use]
    pub fn is_proceed_enabled(&self) -> bool {
        self.proceed_enabled
    }

    /// Returns the greeting text for the current state.
    #[must_use]
    pub fn greeting(&self) -> String {
        match &self.state {
            RegistrationState::Unregistered => self.config.unregistered_greeting.clone(),
            RegistrationState::Registered { customer_name } => {
                self.config.registered_greeting_for(customer_name)
            }
        }
    }

    /// Commands that bring a freshly shown dialog in line with the controller.
    #[must_use]
    pub fn open(&self) -> Vec<UiCommand> {
        vec![
            UiCommand::SetGreeting(self.greeting()),
            UiCommand::FillInputFields {
                customer_name: self.fields.customer_name.clone(),
                license_key: self.fields.license_key.clone(),
            },
            UiCommand::SetProceedEnabled(self.proceed_enabled),
            UiCommand::HideSpinner,
            UiCommand::HideError,
        ]
    }

    /// Handles one UI event.
    pub fn handle(&mut self, event: UiEvent) -> Vec<UiCommand> {
        match event {
            UiEvent::CustomerNameChanged(name) => {
                self.fields.customer_name = name;
                self.fields_changed()
            }
            UiEvent::LicenseKeyChanged(key) => {
                self.fields.license_key = key;
                self.fields_changed()
            }
            UiEvent::Proceed => self.proceed(),
            UiEvent::Cancel => {
                let mut commands = self.clear_input_fields();
                commands.push(UiCommand::CloseWindow);
                commands
            }
            UiEvent::LostKey => {
                info!("Opening lost key page");
                vec![UiCommand::OpenUrl(self.config.lost_key_url.clone())]
            }
            UiEvent::BuyOnline => {
                info!("Opening purchase page");
                vec![UiCommand::OpenUrl(self.config.buy_online_url.clone())]
            }
            UiEvent::QuickApplyLinkOpened(link) => self.quick_apply(&link),
        }
    }

    /// Empties both fields and disables proceed.
    pub fn clear_input_fields(&mut self) -> Vec<UiCommand> {
        self.fields = RegistrationRequest::new("", "");
        self.proceed_enabled = false;
        let mut commands = self.hide_error();
        commands.extend([
            UiCommand::ClearInputFields,
            UiCommand::SetProceedEnabled(false),
        ]);
        commands
    }

    fn fields_changed(&mut self) -> Vec<UiCommand> {
        self.proceed_enabled = self.fields.is_complete();
        let mut commands = self.hide_error();
        commands.push(UiCommand::SetProceedEnabled(self.proceed_enabled));
        commands
    }

    fn proceed(&mut self) -> Vec<UiCommand> {
        if !self.proceed_enabled {
            debug!("Proceed ignored: fields incomplete");
            return Vec::new();
        }

        let mut commands = self.hide_error();
        commands.extend([UiCommand::ShowSpinner, UiCommand::SetProceedEnabled(false)]);

        let validation = self.validator.validate(&self.fields);
        commands.push(UiCommand::HideSpinner);

        if validation.valid {
            let customer_name = self.fields.customer_name.trim().to_string();
            info!("Registration accepted");
            self.proceed_enabled = false;
            self.state = RegistrationState::Registered {
                customer_name: customer_name.clone(),
            };
            commands.extend([
                UiCommand::SetGreeting(self.greeting()),
                UiCommand::Registered { customer_name },
                UiCommand::CloseWindow,
            ]);
        } else {
            commands.push(UiCommand::SetProceedEnabled(true));
            let message = validation.message.unwrap_or_default();
            commands.extend(self.reject(message));
        }
        commands
    }

    fn quick_apply(&mut self, link: &str) -> Vec<UiCommand> {
        match self.validator.decompose_quick_apply_link(link) {
            Ok(request) => {
                debug!("Quick-apply link decoded, filling fields");
                self.fields = request;
                self.proceed_enabled = self.fields.is_complete();
                let mut commands = vec![UiCommand::FillInputFields {
                    customer_name: self.fields.customer_name.clone(),
                    license_key: self.fields.license_key.clone(),
                }];
                commands.extend(self.proceed());
                commands
            }
            Err(e) => {
                warn!("Quick-apply link rejected: {}", e);
                self.reject(e.to_string())
            }
        }
    }

    fn reject(&mut self, message: String) -> Vec<UiCommand> {
        self.error_visible = true;
        vec![UiCommand::ShowError(message), UiCommand::ShakeWindow]
    }

    fn hide_error(&mut self) -> Vec<UiCommand> {
        if std::mem::take(&mut self.error_visible) {
            vec![UiCommand::HideError]
        } else {
            Vec::new()
        }
    }
}
