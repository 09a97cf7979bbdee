/*!
Metric identity and configuration.
*/

use alloc::{format, string::String, vec::Vec};
use core::{fmt, str::FromStr};

/**
The identity and configuration shared by every metric.

This is supplied once when a metric is registered and never changes afterwards.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommonMetricData {
    pub category: String,
    pub name: String,
    pub send_in_pings: Vec<String>,
    pub lifetime: Lifetime,
    pub disabled: bool,
}

impl CommonMetricData {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        send_in_pings: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        CommonMetricData {
            category: category.into(),
            name: name.into(),
            send_in_pings: send_in_pings.into_iter().map(Into::into).collect(),
            lifetime: Lifetime::Ping,
            disabled: false,
        }
    }

    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /**
    The fully qualified name of the metric, like `category.name`.

    Metrics without a category are identified by their name alone.
    */
    pub fn identifier(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.category, self.name)
        }
    }

    /**
    The ping read by test accessors when no ping name is given.
    */
    pub fn default_ping(&self) -> Option<&str> {
        self.send_in_pings.first().map(|ping| ping.as_str())
    }

    pub fn should_record(&self) -> bool {
        !self.disabled
    }
}

/**
How long a metric's recorded data is kept for.
*/
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lifetime {
    /**
    Cleared whenever the ping it's stored in is collected.
    */
    #[default]
    Ping,
    /**
    Cleared when the application restarts.
    */
    Application,
    /**
    Kept until storage is explicitly reset.
    */
    User,
}

impl Lifetime {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Ping => "ping",
            Lifetime::Application => "application",
            Lifetime::User => "user",
        }
    }
}

impl fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = ParseLifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for lifetime in [Lifetime::Ping, Lifetime::Application, Lifetime::User] {
            if s.eq_ignore_ascii_case(lifetime.as_str()) {
                return Ok(lifetime);
            }
        }

        Err(ParseLifetimeError {})
    }
}

#[derive(Debug)]
pub struct ParseLifetimeError {}

impl fmt::Display for ParseLifetimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the input was not a valid lifetime")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLifetimeError {}
