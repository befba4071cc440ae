use std::rc::Rc;

use tracing::{debug, warn};

use crate::{
    ast::{Position, Program, Statement},
    error::{EvalError, VeLaError},
    interpreter::{environment::Bindings, session::Interpreter, value::core::Operand},
};

/// Something that can expose its fields to a VeLa program.
pub trait BindingSource {
    /// The bindings pushed as the innermost scope while this item is
    /// evaluated.
    fn bindings(&self) -> Bindings;
}

impl BindingSource for Bindings {
    fn bindings(&self) -> Bindings {
        self.clone()
    }
}

/// The fields of a variable-star observation that VeLa programs can refer to.
///
/// The standard fields are bound as `time` (Julian date), `magnitude`,
/// `uncertainty`, `band` and `obscode`. Extra fields are bound under their own
/// names and may shadow the standard ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    /// Julian date of the observation.
    pub time:        f64,
    /// Measured magnitude.
    pub magnitude:   f64,
    /// Magnitude uncertainty.
    pub uncertainty: f64,
    /// Photometric band description, e.g. `"Visual"` or `"Johnson V"`.
    pub band:        String,
    /// Observer code.
    pub obscode:     String,
    /// Any further named fields.
    pub extra:       Bindings,
}

impl Observation {
    /// Creates an observation with empty band and observer code.
    #[must_use]
    pub fn new(time: f64, magnitude: f64, uncertainty: f64) -> Self {
        Self { time,
               magnitude,
               uncertainty,
               ..Self::default() }
    }

    /// Sets the band.
    #[must_use]
    pub fn with_band(mut self, band: impl Into<String>) -> Self {
        self.band = band.into();
        self
    }

    /// Sets the observer code.
    #[must_use]
    pub fn with_obscode(mut self, obscode: impl Into<String>) -> Self {
        self.obscode = obscode.into();
        self
    }

    /// Adds an extra named field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.extra.insert(name, value);
        self
    }
}

impl BindingSource for Observation {
    fn bindings(&self) -> Bindings {
        let mut bindings = Bindings::new().with("time", self.time)
                                          .with("magnitude", self.magnitude)
                                          .with("uncertainty", self.uncertainty)
                                          .with("band", self.band.as_str())
                                          .with("obscode", self.obscode.as_str());
        for (name, value) in self.extra.iter() {
            bindings.insert(name, value.clone());
        }
        bindings
    }
}

/// What an [`ObservationFilter`] does when evaluating one item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log the error and leave the item out.
    Skip,
}

/// Selects the items for which a boolean VeLa expression holds.
///
/// The expression is parsed once when the filter is created. Each item's
/// bindings are pushed as a fresh scope, the expression is evaluated and the
/// scope is popped again, also when evaluation fails.
///
/// ## Example
/// ```
/// use vela::{
///     Interpreter,
///     filter::{ErrorPolicy, Observation, ObservationFilter},
/// };
///
/// let observations = vec![Observation::new(2_459_000.5, 9.2, 0.1).with_band("Visual"),
///                         Observation::new(2_459_001.5, 11.4, 0.1).with_band("Visual"),
///                         Observation::new(2_459_002.5, 9.8, 0.02).with_band("Johnson V")];
///
/// let mut vela = Interpreter::new();
/// let filter = ObservationFilter::new(&mut vela,
///                                     "magnitude < 10 & band = \"Visual\"",
///                                     ErrorPolicy::Abort).unwrap();
/// let bright = filter.apply(&mut vela, &observations).unwrap();
///
/// assert_eq!(bright.len(), 1);
/// assert_eq!(bright[0].time, 2_459_000.5);
/// ```
#[derive(Debug, Clone)]
pub struct ObservationFilter {
    program: Rc<Program>,
    policy:  ErrorPolicy,
}

impl ObservationFilter {
    /// Parses `source` into a filter.
    pub fn new(interpreter: &mut Interpreter,
               source: &str,
               policy: ErrorPolicy)
               -> Result<Self, VeLaError> {
        let program = interpreter.parse(source)?;
        debug!(source, ?policy, "compiled observation filter");
        Ok(Self { program, policy })
    }

    /// The policy applied to failing items.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Evaluates the filter against one item.
    ///
    /// # Errors
    /// Any evaluation error, or `TypeMismatch` if the expression does not
    /// produce a boolean.
    pub fn matches(&self,
                   interpreter: &mut Interpreter,
                   item: &impl BindingSource)
                   -> Result<bool, EvalError> {
        interpreter.push_environment(item.bindings());
        let result = interpreter.evaluate(&self.program);
        interpreter.pop_environment()?;

        let pos = self.program
                      .statements
                      .last()
                      .map_or_else(Position::default, Statement::position);
        result?.ok_or_else(|| EvalError::missing_value(pos))?
               .as_bool(pos)
    }

    /// Returns clones of the items the filter accepts, in order.
    ///
    /// # Errors
    /// Under [`ErrorPolicy::Abort`], the first item's evaluation error. Under
    /// [`ErrorPolicy::Skip`], failing items are logged and left out.
    pub fn apply<T>(&self, interpreter: &mut Interpreter, items: &[T]) -> Result<Vec<T>, EvalError>
        where T: BindingSource + Clone
    {
        let mut accepted = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.matches(interpreter, item) {
                Ok(true) => accepted.push(item.clone()),
                Ok(false) => {},
                Err(e) if self.policy == ErrorPolicy::Skip => {
                    warn!(index, error = %e, "skipping item that failed the filter");
                },
                Err(e) => return Err(e),
            }
        }
        debug!(accepted = accepted.len(), total = items.len(), "applied observation filter");
        Ok(accepted)
    }
}
