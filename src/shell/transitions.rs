//! Scene-transition options and the navigation seam used to launch other
//! screens.

use serde_json::{Map, Value, json};

use crate::error::Result;

/// Reference to a view participating in a shared-element transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    id: String,
}

impl ViewHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Options describing how the target screen should animate in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOptions {
    pub shared_view: String,
    pub transition_name: String,
}

impl TransitionOptions {
    /// Scene transition keyed by a shared view and its transition name.
    pub fn scene(view: &ViewHandle, transition_name: impl Into<String>) -> Self {
        Self {
            shared_view: view.id().to_string(),
            transition_name: transition_name.into(),
        }
    }

    /// Options bag handed to the host alongside the launch request.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("shared_view".to_string(), json!(self.shared_view));
        fields.insert("transition_name".to_string(), json!(self.transition_name));
        fields
    }
}

/// Launch request for another screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRequest {
    pub target: String,
    pub extras: Map<String, Value>,
}

impl ScreenRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            extras: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extras.insert(key.to_string(), value.into());
        self
    }
}

/// Host navigation seam: starts screens on behalf of a shell.
pub trait Navigator {
    fn start_screen(
        &mut self,
        request: ScreenRequest,
        options: Option<TransitionOptions>,
    ) -> Result<()>;
}

/// Records launches for assertions in tests and demos.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub launches: Vec<(ScreenRequest, Option<TransitionOptions>)>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for RecordingNavigator {
    fn start_screen(
        &mut self,
        request: ScreenRequest,
        options: Option<TransitionOptions>,
    ) -> Result<()> {
        self.launches.push((request, options));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_options_carry_view_and_name() {
        let view = ViewHandle::new("avatar");
        let options = TransitionOptions::scene(&view, "profile_photo");
        assert_eq!(options.shared_view, "avatar");
        assert_eq!(options.transition_name, "profile_photo");

        let fields = options.to_fields();
        assert_eq!(fields.get("shared_view"), Some(&json!("avatar")));
    }

    #[test]
    fn recording_navigator_collects_launches() {
        let mut navigator = RecordingNavigator::new();
        let request = ScreenRequest::new("profile").with_extra("recipient", "alice");
        navigator.start_screen(request.clone(), None).expect("start");
        assert_eq!(navigator.launches.len(), 1);
        assert_eq!(navigator.launches[0].0, request);
    }
}
