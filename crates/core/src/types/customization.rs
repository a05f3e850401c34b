//! Product customization fields and selected values.
//!
//! Products define a list of customization inputs (free text, a fixed set
//! of options, or a checkbox). The shopper's selections are attached to a
//! cart line as a label-to-value map and are immutable after the line is
//! added.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Selected customization values for one cart line, keyed by field label.
pub type Customizations = BTreeMap<String, CustomizationValue>;

/// A customization input declared on a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationField {
    /// Field label, unique within one product's definition.
    pub label: String,
    /// Input kind and, for selects, the allowed options.
    #[serde(flatten)]
    pub kind: CustomizationKind,
}

/// Input kind for a [`CustomizationField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomizationKind {
    /// Free-form text input.
    Text,
    /// One of a fixed set of option strings.
    Select {
        /// The allowed options, in display order.
        options: Vec<String>,
    },
    /// Boolean yes/no toggle.
    Checkbox,
}

impl CustomizationField {
    /// Initial selection shown before the shopper touches the field.
    ///
    /// Checkboxes start unchecked, selects start on their first option, and
    /// text starts empty. A select with no options degrades to empty text.
    #[must_use]
    pub fn default_value(&self) -> CustomizationValue {
        match &self.kind {
            CustomizationKind::Text => CustomizationValue::Text(String::new()),
            CustomizationKind::Select { options } => options.first().map_or_else(
                || CustomizationValue::Text(String::new()),
                |option| CustomizationValue::Choice(option.clone()),
            ),
            CustomizationKind::Checkbox => CustomizationValue::Flag(false),
        }
    }
}

/// A selected customization value attached to a cart line.
///
/// The wire shape is untagged `string | boolean` (the persisted record
/// carries no tags), so `Choice` serializes identically to `Text` and a
/// reloaded selection always deserializes as `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomizationValue {
    /// Checkbox state.
    Flag(bool),
    /// Free-form text entered by the shopper.
    Text(String),
    /// One of the product-defined options.
    Choice(String),
}

impl CustomizationValue {
    /// Render this value for a line summary, or `None` when it is hidden.
    ///
    /// A set flag renders as the bare label, an unset flag and empty text
    /// render nothing, and any other value renders as `label: value`.
    #[must_use]
    pub fn summary(&self, label: &str) -> Option<String> {
        match self {
            Self::Flag(true) => Some(label.to_string()),
            Self::Flag(false) => None,
            Self::Text(value) | Self::Choice(value) => {
                if value.is_empty() {
                    None
                } else {
                    Some(format!("{label}: {value}"))
                }
            }
        }
    }
}
