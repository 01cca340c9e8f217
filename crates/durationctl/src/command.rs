use clap::{Args, Subcommand};
use snafu::{ResultExt, Snafu};
use stackable_duration::{ArithmeticError, Duration, DurationUnit, ParseDurationError};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse duration"))]
    ParseDuration { source: ParseDurationError },

    #[snafu(display("failed to compute {operation} of {lhs} and {rhs}"))]
    Arithmetic {
        source: ArithmeticError,
        operation: &'static str,
        lhs: Duration,
        rhs: Duration,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a duration and print it in every supported format.
    Parse(Input),

    /// Print a duration in a single unit.
    Convert {
        #[command(flatten)]
        input: Input,

        /// The UNIT to print the duration in, one of ns, us, ms, s, m, h or d.
        #[arg(short, long, value_name = "UNIT")]
        unit: DurationUnit,

        /// The number of decimals to print, at most 12.
        #[arg(short, long, env = "DURATIONCTL_DECIMALS", default_value_t = 3)]
        decimals: usize,
    },

    /// Add two durations.
    Add(Operands),

    /// Subtract the second duration from the first one.
    Sub(Operands),

    /// Split a duration into days, hours, minutes, seconds and nanoseconds.
    Components(Input),
}

#[derive(Debug, Args)]
pub struct Input {
    /// A duration, like "1h 30m" or "PT1H30M".
    #[arg(allow_hyphen_values = true)]
    input: String,
}

impl Input {
    fn parse(&self) -> Result<Duration, Error> {
        Duration::parse(&self.input).context(ParseDurationSnafu)
    }
}

#[derive(Debug, Args)]
pub struct Operands {
    #[arg(allow_hyphen_values = true)]
    lhs: String,

    #[arg(allow_hyphen_values = true)]
    rhs: String,
}

impl Operands {
    fn parse(&self) -> Result<(Duration, Duration), Error> {
        let lhs = Duration::parse(&self.lhs).context(ParseDurationSnafu)?;
        let rhs = Duration::parse(&self.rhs).context(ParseDurationSnafu)?;
        Ok((lhs, rhs))
    }
}

impl Command {
    /// Runs the command and returns the text to print. With `iso`, single durations are
    /// printed in the ISO-8601 format.
    pub fn run(&self, iso: bool) -> Result<String, Error> {
        let render = |duration: Duration| {
            if iso {
                duration.to_iso_string()
            } else {
                duration.to_string()
            }
        };

        match self {
            Self::Parse(input) => {
                let duration = input.parse()?;

                Ok(format!(
                    "default: {duration}\niso: {iso}\nnanoseconds: {nanos}",
                    iso = duration.to_iso_string(),
                    nanos = duration.whole_nanoseconds()
                ))
            }
            Self::Convert {
                input,
                unit,
                decimals,
            } => Ok(input.parse()?.to_string_in(*unit, *decimals)),
            Self::Add(operands) => {
                let (lhs, rhs) = operands.parse()?;
                let sum = lhs.try_add(rhs).context(ArithmeticSnafu {
                    operation: "sum",
                    lhs,
                    rhs,
                })?;

                Ok(render(sum))
            }
            Self::Sub(operands) => {
                let (lhs, rhs) = operands.parse()?;
                let difference = lhs.try_sub(rhs).context(ArithmeticSnafu {
                    operation: "difference",
                    lhs,
                    rhs,
                })?;

                Ok(render(difference))
            }
            Self::Components(input) => {
                let (days, hours, minutes, seconds, nanoseconds) =
                    input.parse()?.to_components_days();

                Ok(format!(
                    "days: {days}\nhours: {hours}\nminutes: {minutes}\nseconds: {seconds}\nnanoseconds: {nanoseconds}"
                ))
            }
        }
    }
}
