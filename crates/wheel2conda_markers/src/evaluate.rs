//! Evaluation of parsed markers against a [`TargetEnvironment`]

use std::str::FromStr;

use pep440_rs::{Version, VersionSpecifier};

use crate::{
    environment::TargetEnvironment,
    error::MarkerError,
    parse::parse_marker,
    tree::{BoolOperator, MarkerExpression, MarkerOperator, MarkerValue},
};

/// The environment variables a marker may refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerVariable {
    /// `python_version`
    PythonVersion,
    /// `python_full_version`
    PythonFullVersion,
    /// `sys.platform` / `sys_platform`
    SysPlatform,
    /// `os.name` / `os_name`
    OsName,
    /// `platform.version` / `platform_version`
    PlatformVersion,
    /// `platform.machine` / `platform_machine`
    PlatformMachine,
    /// `platform.python_implementation` / `platform_python_implementation`
    PlatformPythonImplementation,
    /// `platform.system` / `platform_system`
    PlatformSystem,
    /// `implementation_name`
    ImplementationName,
    /// `extra`
    Extra,
}

impl MarkerVariable {
    /// Look up a variable by the name used in a marker. Both the dotted and
    /// the underscore spelling are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let variable = match name {
            "python_version" => MarkerVariable::PythonVersion,
            "python_full_version" => MarkerVariable::PythonFullVersion,
            "sys.platform" | "sys_platform" => MarkerVariable::SysPlatform,
            "os.name" | "os_name" => MarkerVariable::OsName,
            "platform.version" | "platform_version" => MarkerVariable::PlatformVersion,
            "platform.machine" | "platform_machine" => MarkerVariable::PlatformMachine,
            "platform.python_implementation" | "platform_python_implementation" => {
                MarkerVariable::PlatformPythonImplementation
            }
            "platform.system" | "platform_system" => MarkerVariable::PlatformSystem,
            "implementation_name" => MarkerVariable::ImplementationName,
            "extra" => MarkerVariable::Extra,
            _ => return None,
        };
        Some(variable)
    }

    /// The value of this variable in the given environment
    pub fn value(&self, env: &TargetEnvironment) -> String {
        match self {
            MarkerVariable::PythonVersion => env.python_version().to_string(),
            MarkerVariable::PythonFullVersion => env.python_full_version(),
            MarkerVariable::SysPlatform => env.os().sys_platform().to_string(),
            MarkerVariable::OsName => env.os().os_name().to_string(),
            // unknown for a platform we are not running on
            MarkerVariable::PlatformVersion => String::new(),
            MarkerVariable::PlatformMachine => env.bitness().platform_machine().to_string(),
            MarkerVariable::PlatformPythonImplementation => "CPython".to_string(),
            MarkerVariable::PlatformSystem => env.os().platform_system().to_string(),
            MarkerVariable::ImplementationName => "cpython".to_string(),
            // no extras are requested when converting
            MarkerVariable::Extra => String::new(),
        }
    }
}

impl MarkerValue {
    /// Substitute identifiers with their value in `env`
    pub fn resolve(&self, env: &TargetEnvironment) -> Result<String, MarkerError> {
        match self {
            MarkerValue::Literal(value) => Ok(value.clone()),
            MarkerValue::Identifier(name) => MarkerVariable::from_name(name)
                .map(|variable| variable.value(env))
                .ok_or_else(|| MarkerError::UnsupportedVariable(name.clone())),
        }
    }
}

impl MarkerExpression {
    /// Evaluate this expression for `env`.
    ///
    /// Both sides of `and` / `or` are always evaluated so that an
    /// unsupported variable is reported regardless of the other operand.
    pub fn evaluate(&self, env: &TargetEnvironment) -> Result<bool, MarkerError> {
        match self {
            MarkerExpression::Compare { lhs, operator, rhs } => {
                let lhs = lhs.resolve(env)?;
                let rhs = rhs.resolve(env)?;
                compare(&lhs, *operator, &rhs)
            }
            MarkerExpression::BoolOp { operator, lhs, rhs } => {
                let lhs = lhs.evaluate(env)?;
                let rhs = rhs.evaluate(env)?;
                Ok(match operator {
                    BoolOperator::And => lhs && rhs,
                    BoolOperator::Or => lhs || rhs,
                })
            }
        }
    }
}

/// Compare two substituted operands.
///
/// Operands that both parse as versions are compared as versions, anything
/// else falls back to string comparison.
pub fn compare(lhs: &str, operator: MarkerOperator, rhs: &str) -> Result<bool, MarkerError> {
    let versions = || {
        Version::from_str(lhs)
            .ok()
            .zip(Version::from_str(rhs).ok())
    };
    let ordering = || match versions() {
        Some((lhs, rhs)) => lhs.cmp(&rhs),
        None => lhs.cmp(rhs),
    };

    let result = match operator {
        MarkerOperator::In => rhs.contains(lhs),
        MarkerOperator::NotIn => !rhs.contains(lhs),
        MarkerOperator::ExactEqual => lhs == rhs,
        MarkerOperator::Equal => ordering().is_eq(),
        MarkerOperator::NotEqual => ordering().is_ne(),
        MarkerOperator::LessThan => ordering().is_lt(),
        MarkerOperator::LessEqual => ordering().is_le(),
        MarkerOperator::GreaterThan => ordering().is_gt(),
        MarkerOperator::GreaterEqual => ordering().is_ge(),
        MarkerOperator::TildeEqual => {
            let invalid = || MarkerError::InvalidComparison {
                lhs: lhs.to_string(),
                operator: operator.to_string(),
                rhs: rhs.to_string(),
            };
            let (lhs_version, _) = versions().ok_or_else(invalid)?;
            let specifier =
                VersionSpecifier::from_str(&format!("~={rhs}")).map_err(|_| invalid())?;
            specifier.contains(&lhs_version)
        }
    };

    Ok(result)
}

/// Parse and evaluate a marker for `env`.
pub fn eval_marker(marker: &str, env: &TargetEnvironment) -> Result<bool, MarkerError> {
    let expr = parse_marker(marker)?;
    let result = expr.evaluate(env)?;
    tracing::trace!("marker `{marker}` is {result} for {env}");
    Ok(result)
}
