//! Numeric locale, carried as a plain value.
//!
//! The locale never touches any process-global state: it travels inside the
//! scan call, so two concurrent scans with different locales cannot observe
//! each other.

/// Digit classification and grouping rules for localized numeric scanning.
///
/// # Default
///
/// The default is the "C" locale: `.` decimal point, `,` thousands
/// separator, ASCII digits, groups of three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Character separating the integer and fractional parts of a float.
    pub decimal_point: char,
    /// Character permitted between digit groups when the `'` spec option is
    /// set.
    pub thousands_sep: char,
    /// Digit-group sizes, least significant group first. The last entry
    /// repeats for all remaining groups.
    pub grouping: &'static [u8],
    /// The character representing the digit zero. Digits one through nine
    /// are the nine consecutive scalar values following it.
    pub zero: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal_point: '.',
            thousands_sep: ',',
            grouping: &[3],
            zero: '0',
        }
    }
}

impl Locale {
    /// Value of `ch` as a digit in `base`, using this locale's digit range.
    ///
    /// Letters extend the digit set for bases above ten regardless of
    /// locale, mirroring how classic scanning treats them.
    #[must_use]
    pub fn digit_value(&self, ch: char, base: u32) -> Option<u32> {
        let d = (ch as u32).wrapping_sub(self.zero as u32);
        if d < 10 {
            return (d < base).then_some(d);
        }
        let letter = match ch {
            'a'..='z' => ch as u32 - 'a' as u32 + 10,
            'A'..='Z' => ch as u32 - 'A' as u32 + 10,
            _ => return None,
        };
        (letter < base).then_some(letter)
    }

    /// Checks a sequence of digit-group sizes (most significant group
    /// first) against this locale's grouping rules.
    #[must_use]
    pub(crate) fn groups_are_valid(&self, groups: &[usize]) -> bool {
        let Some((first, rest)) = groups.split_first() else {
            return true;
        };
        if rest.is_empty() {
            // A literal with no separators is always well grouped.
            return *first > 0;
        }
        // Expected sizes run from the least significant group upward.
        let mut expected = self
            .grouping
            .iter()
            .copied()
            .chain(core::iter::repeat(*self.grouping.last().unwrap_or(&3)));
        for &size in rest.iter().rev() {
            let want = usize::from(expected.next().unwrap_or(3));
            if size != want {
                return false;
            }
        }
        let leading_max = usize::from(expected.next().unwrap_or(3));
        *first >= 1 && *first <= leading_max
    }
}

#[cfg(test)]
mod tests {
    use super::Locale;

    #[test]
    fn digit_values_follow_base() {
        let loc = Locale::default();
        assert_eq!(loc.digit_value('7', 10), Some(7));
        assert_eq!(loc.digit_value('7', 7), None);
        assert_eq!(loc.digit_value('f', 16), Some(15));
        assert_eq!(loc.digit_value('F', 16), Some(15));
        assert_eq!(loc.digit_value('g', 16), None);
        assert_eq!(loc.digit_value('z', 36), Some(35));
    }

    #[test]
    fn localized_zero_shifts_digit_range() {
        let loc = Locale {
            zero: '٠', // Arabic-Indic zero
            ..Locale::default()
        };
        assert_eq!(loc.digit_value('٣', 10), Some(3));
        assert_eq!(loc.digit_value('3', 10), None);
    }

    #[test]
    fn grouping_validation() {
        let loc = Locale::default();
        assert!(loc.groups_are_valid(&[1, 3, 3])); // 1,234,567
        assert!(loc.groups_are_valid(&[3]));
        assert!(!loc.groups_are_valid(&[1, 2])); // 1,23
        assert!(!loc.groups_are_valid(&[4, 3])); // 1234,567
        assert!(!loc.groups_are_valid(&[1, 3, 0])); // trailing separator
    }

    #[test]
    fn irregular_grouping() {
        // South-Asian style: last group of three, then twos.
        let loc = Locale {
            grouping: &[3, 2],
            ..Locale::default()
        };
        assert!(loc.groups_are_valid(&[1, 2, 2, 3])); // 1,22,22,333
        assert!(!loc.groups_are_valid(&[1, 3, 3]));
    }
}
