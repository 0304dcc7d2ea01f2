//! Declarative modifier definitions.
//!
//! Provides the loosely-typed, serializable form of a modifier that lives
//! in content files (item tables, status-effect catalogs) and is translated
//! into a typed [`Modifier`] at the registry boundary, before it ever
//! reaches a property. All type checking happens here during translation;
//! resolution and calculation never see an ill-typed modifier.

use crate::error::StatError;
use crate::modifier::{Modifier, ModifierOp};
use crate::numeric::{StatNumeric, StatValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The operation field of a declarative definition.
///
/// Serialized with an adjacent `kind` tag:
///
/// ```json
/// { "kind": "percent-add", "value": 0.25 }
/// ```
///
/// Override values stay loosely typed (`serde_json::Value`) until the
/// definition is compiled against a concrete stat type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DefOp {
    /// Flat delta in the base-add stage.
    BaseAdd { value: f64 },
    /// Fractional bonus in the percent stage.
    PercentAdd { value: f64 },
    /// Multiplier in the final stage.
    FinalMultiply { value: f64 },
    /// Outright replacement; the value is typed at compile time.
    Override { value: serde_json::Value },
}

/// A declarative modifier definition.
///
/// This is the form game content uses to describe modifiers. It must be
/// compiled into a typed [`Modifier`] before being applied to a property;
/// a definition that does not fit the property's value type fails
/// compilation with [`StatError::InvalidDef`] and never reaches the
/// property.
///
/// # Examples
///
/// ```rust
/// use statmod::{Modifier, ModifierDef};
///
/// let def = ModifierDef::from_json(
///     r#"{
///         "op": { "kind": "base-add", "value": 10.0 },
///         "priority": 5,
///         "effect_tags": ["enchanted"]
///     }"#,
/// )
/// .unwrap();
///
/// let modifier: Modifier<f64> = def.compile().unwrap();
/// assert_eq!(modifier.priority(), 5);
/// assert!(modifier.effect_tags().contains_str("enchanted"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDef {
    /// The operation to perform.
    pub op: DefOp,
    /// Priority; higher applies first. Defaults to 0.
    #[serde(default)]
    pub priority: i32,
    /// Labels describing what this modifier is.
    #[serde(default)]
    pub effect_tags: Vec<String>,
    /// Effect tags of other modifiers this one suppresses.
    #[serde(default)]
    pub cancels_effect_tags: Vec<String>,
    /// Context tags contributed once this modifier survives cancellation.
    #[serde(default)]
    pub context_tags: Vec<String>,
    /// Context tags required for this modifier to apply (any one suffices).
    #[serde(default)]
    pub required_context_tags: Vec<String>,
}

impl ModifierDef {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, StatError> {
        serde_json::from_str(json).map_err(|e| StatError::InvalidDef(e.to_string()))
    }

    /// Compile into a typed modifier for a numeric stat.
    ///
    /// Staged operations convert directly; an override value must
    /// deserialize into the stat type or compilation fails.
    pub fn compile<T>(&self) -> Result<Modifier<T>, StatError>
    where
        T: StatNumeric + DeserializeOwned,
    {
        let op = match &self.op {
            DefOp::BaseAdd { value } => ModifierOp::BaseAdd(T::from_f64(*value)),
            DefOp::PercentAdd { value } => ModifierOp::PercentAdd(*value),
            DefOp::FinalMultiply { value } => ModifierOp::FinalMultiply(*value),
            DefOp::Override { value } => ModifierOp::Override(self.typed_value(value)?),
        };
        Ok(self.attach_tags(Modifier::from_op(op)))
    }

    /// Compile into a typed modifier for a discrete stat.
    ///
    /// Only override definitions fit discrete stats; staged operations are
    /// rejected with [`StatError::InvalidDef`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use statmod::{Modifier, ModifierDef, StatValue};
    ///
    /// #[derive(Debug, Clone, PartialEq, Deserialize)]
    /// #[serde(rename_all = "kebab-case")]
    /// enum Gait {
    ///     Walking,
    ///     Swimming,
    /// }
    /// impl StatValue for Gait {}
    ///
    /// let def = ModifierDef::from_json(
    ///     r#"{ "op": { "kind": "override", "value": "swimming" } }"#,
    /// )
    /// .unwrap();
    ///
    /// let modifier: Modifier<Gait> = def.compile_override().unwrap();
    /// assert_eq!(modifier.op().override_value(), Some(&Gait::Swimming));
    /// ```
    pub fn compile_override<T>(&self) -> Result<Modifier<T>, StatError>
    where
        T: StatValue + DeserializeOwned,
    {
        match &self.op {
            DefOp::Override { value } => {
                let op = ModifierOp::Override(self.typed_value(value)?);
                Ok(self.attach_tags(Modifier::from_op(op)))
            }
            other => Err(StatError::InvalidDef(format!(
                "operation {:?} requires a numeric stat",
                other
            ))),
        }
    }

    fn typed_value<T: DeserializeOwned>(&self, value: &serde_json::Value) -> Result<T, StatError> {
        serde_json::from_value(value.clone()).map_err(|e| {
            StatError::InvalidDef(format!("override value does not fit the stat type: {}", e))
        })
    }

    fn attach_tags<T>(&self, modifier: Modifier<T>) -> Modifier<T> {
        let mut modifier = modifier.with_priority(self.priority);
        modifier = modifier.effect_tags_from(self.effect_tags.iter().map(String::as_str));
        for tag in &self.cancels_effect_tags {
            modifier = modifier.cancels_tag(tag.as_str());
        }
        for tag in &self.context_tags {
            modifier = modifier.grants_context(tag.as_str());
        }
        for tag in &self.required_context_tags {
            modifier = modifier.requires_context(tag.as_str());
        }
        modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_def() {
        let def =
            ModifierDef::from_json(r#"{ "op": { "kind": "base-add", "value": 5.0 } }"#).unwrap();
        assert_eq!(def.priority, 0);
        assert!(def.effect_tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = ModifierDef::from_json(r#"{ "op": { "kind": "unknown" } }"#);
        assert!(matches!(result, Err(StatError::InvalidDef(_))));
    }

    #[test]
    fn test_compile_numeric_ops() {
        let def =
            ModifierDef::from_json(r#"{ "op": { "kind": "percent-add", "value": 0.25 } }"#)
                .unwrap();
        let m: Modifier<f64> = def.compile().unwrap();
        assert_eq!(m.op(), &ModifierOp::PercentAdd(0.25));

        let def = ModifierDef::from_json(
            r#"{ "op": { "kind": "final-multiply", "value": 0.0 }, "priority": 999 }"#,
        )
        .unwrap();
        let m: Modifier<f64> = def.compile().unwrap();
        assert_eq!(m.op(), &ModifierOp::FinalMultiply(0.0));
        assert_eq!(m.priority(), 999);
    }

    #[test]
    fn test_compile_base_add_rounds_for_integer_stats() {
        let def =
            ModifierDef::from_json(r#"{ "op": { "kind": "base-add", "value": 2.5 } }"#).unwrap();
        let m: Modifier<i32> = def.compile().unwrap();
        assert_eq!(m.op(), &ModifierOp::BaseAdd(3));
    }

    #[test]
    fn test_compile_numeric_override() {
        let def =
            ModifierDef::from_json(r#"{ "op": { "kind": "override", "value": 42.0 } }"#).unwrap();
        let m: Modifier<f64> = def.compile().unwrap();
        assert_eq!(m.op().override_value(), Some(&42.0));
    }

    #[test]
    fn test_compile_override_type_mismatch() {
        let def = ModifierDef::from_json(
            r#"{ "op": { "kind": "override", "value": "not-a-number" } }"#,
        )
        .unwrap();
        let result: Result<Modifier<f64>, _> = def.compile();
        assert!(matches!(result, Err(StatError::InvalidDef(_))));
    }

    #[test]
    fn test_compile_override_for_discrete_stat_rejects_staged_ops() {
        let def =
            ModifierDef::from_json(r#"{ "op": { "kind": "base-add", "value": 1.0 } }"#).unwrap();
        let result: Result<Modifier<bool>, _> = def.compile_override();
        assert!(matches!(result, Err(StatError::InvalidDef(_))));
    }

    #[test]
    fn test_tags_carry_through_compilation() {
        let def = ModifierDef::from_json(
            r#"{
                "op": { "kind": "percent-add", "value": -0.3 },
                "effect_tags": ["frozen"],
                "cancels_effect_tags": ["burning"],
                "context_tags": ["chilled"],
                "required_context_tags": ["wet"]
            }"#,
        )
        .unwrap();
        let m: Modifier<f64> = def.compile().unwrap();

        assert!(m.effect_tags().contains_str("frozen"));
        assert!(m.cancels_effect_tags().contains_str("burning"));
        assert!(m.context_tags().contains_str("chilled"));
        assert!(m.required_context_tags().contains_str("wet"));
    }

    #[test]
    fn test_def_roundtrip() {
        let def = ModifierDef {
            op: DefOp::FinalMultiply { value: 2.0 },
            priority: 10,
            effect_tags: vec!["crit".to_string()],
            cancels_effect_tags: vec![],
            context_tags: vec![],
            required_context_tags: vec![],
        };

        let json = serde_json::to_string(&def).unwrap();
        let back = ModifierDef::from_json(&json).unwrap();
        assert_eq!(back, def);
    }
}
