//! Option exercise style definitions.

/// When an option may be exercised.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any time up to expiry
/// - `Bermudan`: Exercise on listed dates (years from now) and at expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// let bermudan = ExerciseStyle::bermudan(vec![0.25, 0.5, 0.75]);
/// assert!(bermudan.allows_early_exercise());
/// assert!(!ExerciseStyle::European.allows_early_exercise());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,

    /// Bermudan style: exercise on specific dates.
    Bermudan {
        /// Exercise times in years from now
        exercise_dates: Vec<f64>,
    },
}

impl ExerciseStyle {
    /// Creates a Bermudan exercise style with the given exercise times.
    #[inline]
    pub fn bermudan(exercise_dates: Vec<f64>) -> Self {
        ExerciseStyle::Bermudan { exercise_dates }
    }

    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether exercise before expiry is possible.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        !self.is_european()
    }

    /// Short label used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
            ExerciseStyle::Bermudan { .. } => "Bermudan",
        }
    }
}
