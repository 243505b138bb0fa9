use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

/// Fuente de tiempo inyectable.
///
/// Las operaciones que sellan registros reciben el reloj como dependencia en
/// lugar de leer el reloj del sistema directamente.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Reloj detenido en un instante fijo. Útil en tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }
}

/// ISO-8601 en UTC con milisegundos y sufijo `Z` (`2024-05-01T10:00:00.000Z`).
pub fn to_iso8601(ts: DateTime<Utc>) -> String {
  ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn iso8601_has_millis_and_zulu_suffix() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    assert_eq!(to_iso8601(ts), "2024-05-01T10:00:00.000Z");
  }

  #[test]
  fn fixed_clock_does_not_move() {
    let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let clock = FixedClock(ts);
    assert_eq!(clock.now(), clock.now());
    assert_eq!((&clock).now().timestamp_millis(), 1_700_000_000_123);
  }
}
