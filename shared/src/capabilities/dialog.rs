use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DialogOperation {
    Confirm { message: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogResponse {
    pub confirmed: bool,
}

impl DialogResponse {
    #[must_use]
    pub const fn accepted() -> Self {
        Self { confirmed: true }
    }

    #[must_use]
    pub const fn declined() -> Self {
        Self { confirmed: false }
    }
}

impl Operation for DialogOperation {
    type Output = DialogResponse;
}

/// Modal prompts shown by the shell, used to guard destructive actions.
#[derive(Capability)]
pub struct Dialog<Ev> {
    context: CapabilityContext<DialogOperation, Ev>,
}

impl<Ev> Dialog<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<DialogOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn confirm<F>(&self, message: impl Into<String>, make_event: F)
    where
        F: FnOnce(bool) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        let message = message.into();
        self.context.spawn(async move {
            let response = context
                .request_from_shell(DialogOperation::Confirm { message })
                .await;
            context.update_app(make_event(response.confirmed));
        });
    }
}
