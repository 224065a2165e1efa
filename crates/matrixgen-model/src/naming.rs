/// Trailing character that tags an entity or connectivity group for
/// per-position replication.
pub const TEMPLATE_MARKER: char = '_';

/// Matrix role of a connectivity group, derived from its name once during
/// classification and carried as metadata afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SerialInput,
    SerialOutput,
    RowBus,
    ColBus,
    Template,
    Plain,
}

impl Role {
    /// Suffix checks run in a fixed priority order; every role suffix also
    /// ends in the template marker, so the first match wins.
    #[must_use]
    pub fn of(name: &str) -> Role {
        const SUFFIXES: [(&str, Role); 4] = [
            ("IN_", Role::SerialInput),
            ("OUT_", Role::SerialOutput),
            ("ROW_", Role::RowBus),
            ("COL_", Role::ColBus),
        ];
        for (suffix, role) in SUFFIXES {
            if name.ends_with(suffix) {
                return role;
            }
        }
        if is_template(name) {
            Role::Template
        } else {
            Role::Plain
        }
    }

    #[must_use]
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Role::SerialInput => Some("IN_"),
            Role::SerialOutput => Some("OUT_"),
            Role::RowBus => Some("ROW_"),
            Role::ColBus => Some("COL_"),
            Role::Template | Role::Plain => None,
        }
    }
}

#[must_use]
pub fn is_template(name: &str) -> bool {
    name.ends_with(TEMPLATE_MARKER)
}

/// Role name minus its role suffix: `DIN_` -> `D`.
#[must_use]
pub fn stem(name: &str, role: Role) -> &str {
    match role.suffix() {
        Some(suffix) => name.strip_suffix(suffix).unwrap_or(name),
        None => name,
    }
}

/// Name minus the trailing marker: `DIN_` -> `DIN`. This is the group's
/// name outside the matrix.
#[must_use]
pub fn external(name: &str) -> &str {
    name.strip_suffix(TEMPLATE_MARKER).unwrap_or(name)
}

/// Replica name for 1-based grid position `p`: `LED_` -> `LED_3`.
#[must_use]
pub fn replica(name: &str, p: usize) -> String {
    format!("{name}{p}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_priority_order() {
        assert_eq!(Role::of("DIN_"), Role::SerialInput);
        assert_eq!(Role::of("DOUT_"), Role::SerialOutput);
        assert_eq!(Role::of("SELROW_"), Role::RowBus);
        assert_eq!(Role::of("SELCOL_"), Role::ColBus);
        assert_eq!(Role::of("LED_"), Role::Template);
        assert_eq!(Role::of("GND"), Role::Plain);
        // role suffixes outrank the bare marker
        assert_eq!(Role::of("VIN_"), Role::SerialInput);
    }

    #[test]
    fn stems_and_external_names() {
        assert_eq!(stem("DIN_", Role::SerialInput), "D");
        assert_eq!(stem("DOUT_", Role::SerialOutput), "D");
        assert_eq!(stem("SELROW_", Role::RowBus), "SEL");
        assert_eq!(external("DIN_"), "DIN");
        assert_eq!(external("LED_"), "LED");
        assert_eq!(external("GND"), "GND");
    }

    #[test]
    fn replica_names_append_the_position() {
        assert_eq!(replica("LED_", 3), "LED_3");
        assert_eq!(replica("R_", 12), "R_12");
    }
}
