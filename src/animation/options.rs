//! Effect options: a loose string-keyed map at the registry boundary,
//! resolved into a typed struct per effect at the start of every run.

use std::collections::BTreeMap;

use crate::{
    Error, Result,
    color::{Easing, Rgb, rgb_from_u32},
};

/// A single option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Color(Rgb),
    Colors(Vec<Rgb>),
    Text(String),
}

/// Option name to value mapping, as accepted by [`Animation::run`](super::Animation::run).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shallow merge of `self` over `defaults`; keys in `self` win
    #[must_use]
    pub fn merged_over(&self, defaults: &Options) -> Options {
        let mut merged = defaults.clone();
        for (key, value) in &self.values {
            merged.values.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Overwrite `slot` with the value stored under `key`, if any
    pub fn apply<T: OptionField>(&self, key: &str, slot: &mut T) -> Result<()> {
        if let Some(value) = self.values.get(key) {
            *slot = T::from_value(value).ok_or_else(|| Error::InvalidOption {
                key: key.into(),
                expected: T::EXPECTED,
            })?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// A type that can be read from and written to an [`OptionValue`].
pub trait OptionField: Sized {
    /// Human readable kind, used in error messages
    const EXPECTED: &'static str;

    fn from_value(value: &OptionValue) -> Option<Self>;

    fn into_value(self) -> OptionValue;
}

impl OptionField for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Bool(self)
    }
}

macro_rules! int_option_field {
    ($($ty:ty),*) => {
        $(
            impl OptionField for $ty {
                const EXPECTED: &'static str = concat!("an integer fitting ", stringify!($ty));

                fn from_value(value: &OptionValue) -> Option<Self> {
                    match value {
                        OptionValue::Int(value) => <$ty>::try_from(*value).ok(),
                        _ => None,
                    }
                }

                #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn into_value(self) -> OptionValue {
                    OptionValue::Int(self as i64)
                }
            }
        )*
    };
}

int_option_field!(u8, u32, u64, usize, i32);

impl OptionField for f32 {
    const EXPECTED: &'static str = "a number";

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Float(value) => Some(*value as f32),
            OptionValue::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Float(f64::from(self))
    }
}

impl OptionField for Rgb {
    const EXPECTED: &'static str = "a color or packed 0xRRGGBB integer";

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Color(color) => Some(*color),
            OptionValue::Int(packed) => u32::try_from(*packed).ok().map(rgb_from_u32),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Color(self)
    }
}

impl OptionField for Vec<Rgb> {
    const EXPECTED: &'static str = "a list of colors";

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Colors(colors) => Some(colors.clone()),
            OptionValue::Color(color) => Some(vec![*color]),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Colors(self)
    }
}

impl OptionField for Easing {
    const EXPECTED: &'static str = "one of linear, ease_in, ease_out, ease_in_out";

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Text(name) => Easing::parse_from_str(name),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Text(self.as_str().into())
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for OptionValue {
    #[allow(clippy::cast_possible_wrap)]
    fn from(value: u64) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Rgb> for OptionValue {
    fn from(value: Rgb) -> Self {
        Self::Color(value)
    }
}

impl From<Vec<Rgb>> for OptionValue {
    fn from(value: Vec<Rgb>) -> Self {
        Self::Colors(value)
    }
}

impl From<Easing> for OptionValue {
    fn from(value: Easing) -> Self {
        value.into_value()
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Typed, fully resolved options of one effect.
pub trait EffectOptions: Default + Clone {
    /// Every option with its current value
    fn to_options(&self) -> Options;

    /// Overwrite fields from `overrides`; unknown keys are ignored
    fn apply(&mut self, overrides: &Options) -> Result<()>;

    /// Defaults with `overrides` applied
    fn resolve(overrides: &Options) -> Result<Self> {
        let mut resolved = Self::default();
        resolved.apply(overrides)?;
        Ok(resolved)
    }
}

/// Declare an effect options struct with its documented defaults.
macro_rules! effect_options {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        impl $crate::animation::EffectOptions for $name {
            #[allow(clippy::clone_on_copy)]
            fn to_options(&self) -> $crate::animation::Options {
                let mut options = $crate::animation::Options::new();
                $(
                    options.insert(
                        stringify!($field),
                        $crate::animation::OptionField::into_value(self.$field.clone()),
                    );
                )*
                options
            }

            fn apply(&mut self, overrides: &$crate::animation::Options) -> $crate::Result<()> {
                $(overrides.apply(stringify!($field), &mut self.$field)?;)*
                Ok(())
            }
        }
    };
}

pub(crate) use effect_options;
