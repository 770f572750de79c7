/* This file is part of ProfitUnity DAO
 *
 * Copyright (C) 2022-2026 ProfitUnity developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use chrono::{DateTime, Local, Utc};

/// Seconds since the Unix epoch, as the contracts store deadlines.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Generate a `Timestamp` of the current time.
    pub fn current_time() -> Self {
        Self(Utc::now().timestamp().max(0) as u64)
    }

    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Timestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let date = i64::try_from(self.0).ok().and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        match date {
            Some(d) => write!(f, "{}", d.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_in_local_time() {
        let secs = 1_700_000_000;
        let local = DateTime::<Utc>::from_timestamp(secs, 0).unwrap().with_timezone(&Local);
        assert_eq!(Timestamp(secs as u64).to_string(), local.format("%Y-%m-%d %H:%M:%S").to_string());
        assert!(!Timestamp(0).to_string().ends_with("UTC"));
        assert_eq!(Timestamp(u64::MAX).to_string(), u64::MAX.to_string());
    }
}
