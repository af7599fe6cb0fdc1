/*!
Tempora is a calendar-agnostic duration and instant library.

It provides exactly three things, and tries to do each of them precisely:

* Parsing and serializing ISO 8601 duration strings, including the
nanosecond-resolution fractional second rule, via [`Duration`]'s
[`FromStr`](core::str::FromStr) and [`Display`](core::fmt::Display)
implementations.
* A validated, immutable [`Duration`] value with ten signed unit fields
(years down to nanoseconds), uniform-sign and overflow invariants, and
nanosecond-normalized arithmetic for its non-calendar fields.
* An [`Instant`], a point on a timeline measured in nanoseconds since the
Unix epoch, with a [rounding operation](Instant::round) configurable by
[`Unit`], increment and [`RoundMode`].

What it very deliberately does not provide: calendar arithmetic. Years,
months and weeks have no fixed length, so a `Duration` carrying any of them
cannot be added, numerically compared or reduced to a scalar — those
operations return an error rather than an approximation. Pair this crate
with a full datetime library when you need a reference point.

# Examples

Add two durations and observe the balanced result:

```
use tempora::Duration;

let d1: Duration = "PT20H".parse()?;
let d2: Duration = "PT6H60M3600S".parse()?;
assert_eq!(d1.add(&d2)?.to_string(), "P1DT4H");
# Ok::<(), tempora::Error>(())
```

Round an instant to the nearest hour:

```
use tempora::{Instant, Unit};

let instant = Instant::from("2024-01-01T08:15:36Z")?;
assert_eq!(instant.round(Unit::Hour)?.to_string(), "2024-01-01T08:00:00Z");
# Ok::<(), tempora::Error>(())
```

# Crate features

* **std** (enabled by default) - Implements the `std::error::Error` trait
for this crate's [`Error`] type. Otherwise, this crate only depends on
`core` and `alloc`.
* **logging** - Emits trace level messages via the [`log`] crate at the
few places where this crate makes a decision worth observing (offset
resolution while parsing a timestamp, divisor selection while rounding).
* **serde** - Implements `Serialize` and `Deserialize` for [`Duration`]
and [`Instant`] through their canonical ISO 8601 string forms.

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Dynamic memory allocation is only used for error values. Everything else
// in this crate is `Copy` data on the stack.
extern crate alloc;

pub use crate::{
    duration::{Duration, DurationFields, DurationLike, DurationWith},
    error::Error,
    instant::{Instant, InstantLike, InstantRound},
    round::{RoundMode, Unit},
};

#[macro_use]
mod logging;

mod duration;
mod error;
pub mod fmt;
mod instant;
mod round;
mod util;
