//! Flag binding for per-command options.
//!
//! Each command declares its options as a type implementing [`Options`]: the
//! type declares its flags (name, default, usage) on a [`FlagSet`] and knows
//! how to build itself back out of the parsed set. Parsing follows the
//! single-dash style of POSIX/Go flags:
//! - `-name=value` or `-name value` for non-boolean flags
//! - `-name` or `-name=false` for boolean flags
//! - `--name` is accepted as a synonym for `-name`
//! - parsing stops at the first non-flag argument or after `--`
//! - `-help` / `-h` request usage unless the command declares them itself

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

/// Errors produced while declaring or parsing flags.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlagError {
    /// `-help` or `-h` was given and not declared by the command.
    #[error("flag: help requested")]
    Help,

    #[error("flag provided but not defined: -{0}")]
    Undefined(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for flag -{flag}: parse error")]
    InvalidValue { flag: String, value: String },

    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    /// The options type declared the same flag twice.
    #[error("flag redefined: {0}")]
    Redefined(String),

    /// The options type read a flag it never declared.
    #[error("flag not declared: -{0}")]
    NotDeclared(String),

    #[error("flag -{flag} is not a {expected}")]
    WrongType {
        flag: String,
        expected: &'static str,
    },
}

/// A typed flag value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
}

impl FlagValue {
    /// Name of the value's type, as shown in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Parses `raw` as a value of the same type as `self`.
    fn parse_same(&self, raw: &str) -> Option<FlagValue> {
        Some(match self {
            Self::Bool(_) => Self::Bool(parse_bool(raw)?),
            Self::Int(_) => Self::Int(raw.parse().ok()?),
            Self::Uint(_) => Self::Uint(raw.parse().ok()?),
            Self::Float(_) => Self::Float(raw.parse().ok()?),
            Self::Str(_) => Self::Str(raw.to_string()),
        })
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::Int(v) => v.fmt(f),
            Self::Uint(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Str(v) => v.fmt(f),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for FlagValue {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for FlagValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// A declared flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagDef {
    pub name: String,
    pub usage: String,
    pub default: FlagValue,
}

/// A set of declared flags and, after [`FlagSet::parse`], their values.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    name: String,
    defs: BTreeMap<String, FlagDef>,
    values: BTreeMap<String, FlagValue>,
    args: Vec<String>,
    redefined: Option<String>,
}

impl FlagSet {
    /// Creates an empty flag set for the named command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a flag with its default value and usage text.
    ///
    /// Declaring the same name twice is recorded and reported by `parse`.
    pub fn define(
        &mut self,
        name: &str,
        default: impl Into<FlagValue>,
        usage: &str,
    ) -> &mut Self {
        if self.defs.contains_key(name) {
            self.redefined.get_or_insert_with(|| name.to_string());
            return self;
        }

        let default = default.into();
        self.values.insert(name.to_string(), default.clone());
        self.defs.insert(
            name.to_string(),
            FlagDef {
                name: name.to_string(),
                usage: usage.to_string(),
                default,
            },
        );
        self
    }

    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> &mut Self {
        self.define(name, default, usage)
    }

    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> &mut Self {
        self.define(name, default, usage)
    }

    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> &mut Self {
        self.define(name, default, usage)
    }

    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> &mut Self {
        self.define(name, default, usage)
    }

    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> &mut Self {
        self.define(name, default, usage)
    }

    /// Declared flags in lexicographic order.
    pub fn visit_all(&self) -> impl Iterator<Item = &FlagDef> {
        self.defs.values()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Parses `args`, overwriting defaults and collecting positional arguments.
    pub fn parse(&mut self, args: &[String]) -> Result<(), FlagError> {
        if let Some(name) = &self.redefined {
            return Err(FlagError::Redefined(name.clone()));
        }

        let mut rest = args.iter();
        while let Some(arg) = rest.as_slice().first() {
            if arg.len() < 2 || !arg.starts_with('-') {
                break;
            }
            rest.next();

            let mut name = &arg[1..];
            if let Some(long) = name.strip_prefix('-') {
                if long.is_empty() {
                    // "--" terminates flags
                    break;
                }
                name = long;
            }

            if name.is_empty() || name.starts_with('-') || name.starts_with('=') {
                return Err(FlagError::BadSyntax(arg.clone()));
            }

            let (name, inline) = match name.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (name, None),
            };

            let Some(def) = self.defs.get(name) else {
                if name == "help" || name == "h" {
                    return Err(FlagError::Help);
                }
                return Err(FlagError::Undefined(name.to_string()));
            };

            let raw = match inline {
                Some(value) => value.to_string(),
                None if def.default.is_bool() => "true".to_string(),
                None => match rest.next() {
                    Some(value) => value.clone(),
                    None => return Err(FlagError::MissingValue(name.to_string())),
                },
            };

            let value = def
                .default
                .parse_same(&raw)
                .ok_or_else(|| FlagError::InvalidValue {
                    flag: name.to_string(),
                    value: raw.clone(),
                })?;
            self.values.insert(name.to_string(), value);
        }

        self.args = rest.cloned().collect();
        Ok(())
    }

    /// Positional arguments left after flag parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Current value of a declared flag.
    pub fn value(&self, name: &str) -> Result<&FlagValue, FlagError> {
        self.values
            .get(name)
            .ok_or_else(|| FlagError::NotDeclared(name.to_string()))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        match self.value(name)? {
            FlagValue::Bool(v) => Ok(*v),
            _ => Err(wrong_type(name, "bool")),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64, FlagError> {
        match self.value(name)? {
            FlagValue::Int(v) => Ok(*v),
            _ => Err(wrong_type(name, "int")),
        }
    }

    pub fn get_uint(&self, name: &str) -> Result<u64, FlagError> {
        match self.value(name)? {
            FlagValue::Uint(v) => Ok(*v),
            _ => Err(wrong_type(name, "uint")),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64, FlagError> {
        match self.value(name)? {
            FlagValue::Float(v) => Ok(*v),
            _ => Err(wrong_type(name, "float")),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<String, FlagError> {
        match self.value(name)? {
            FlagValue::Str(v) => Ok(v.clone()),
            _ => Err(wrong_type(name, "string")),
        }
    }
}

fn wrong_type(flag: &str, expected: &'static str) -> FlagError {
    FlagError::WrongType {
        flag: flag.to_string(),
        expected,
    }
}

/// A command's typed options.
///
/// ```ignore
/// struct EchoFlags { upper: bool }
///
/// impl Options for EchoFlags {
///     fn declare(flags: &mut FlagSet) {
///         flags.bool("upper", false, "shout the reply");
///     }
///
///     fn from_flags(flags: &FlagSet) -> Result<Self, FlagError> {
///         Ok(Self { upper: flags.get_bool("upper")? })
///     }
/// }
/// ```
pub trait Options: Send + Sync + Sized + 'static {
    /// Declares every flag with its default value and usage text.
    fn declare(flags: &mut FlagSet);

    /// Builds the options value from a parsed flag set.
    fn from_flags(flags: &FlagSet) -> Result<Self, FlagError>;
}

/// Commands without options.
impl Options for () {
    fn declare(_flags: &mut FlagSet) {}

    fn from_flags(_flags: &FlagSet) -> Result<Self, FlagError> {
        Ok(())
    }
}

/// Bound options, type-erased. Downcast with the command's own options type.
pub type BoundOptions = Box<dyn Any + Send + Sync>;

/// Type-erased access to a command's [`Options`] type.
pub trait Schema: Send + Sync {
    /// A fresh flag set holding the declared defaults.
    fn flag_set(&self, command: &str) -> FlagSet;

    /// Builds the options value from a parsed flag set.
    fn build(&self, flags: &FlagSet) -> Result<BoundOptions, FlagError>;
}

struct TypedSchema<T>(PhantomData<fn() -> T>);

impl<T: Options> Schema for TypedSchema<T> {
    fn flag_set(&self, command: &str) -> FlagSet {
        let mut flags = FlagSet::new(command);
        T::declare(&mut flags);
        flags
    }

    fn build(&self, flags: &FlagSet) -> Result<BoundOptions, FlagError> {
        Ok(Box::new(T::from_flags(flags)?))
    }
}

/// Returns the schema for an options type.
pub fn schema<T: Options>() -> Arc<dyn Schema> {
    Arc::new(TypedSchema::<T>(PhantomData))
}

/// Binds `args` against a schema: defaults first, then parsed flags.
pub fn bind(
    schema: &dyn Schema,
    command: &str,
    args: &[String],
) -> Result<(BoundOptions, FlagSet), FlagError> {
    let mut flags = schema.flag_set(command);
    flags.parse(args)?;
    let options = schema.build(&flags)?;
    Ok((options, flags))
}
