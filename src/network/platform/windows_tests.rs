//! Tests for the Windows connectivity probe.

use super::windows::{WindowsProbe, metered_from_cost};
use ::windows::Networking::Connectivity::NetworkCostType;

mod cost_mapping {
    use super::*;

    #[test]
    fn unrestricted_is_unmetered() {
        assert_eq!(
            metered_from_cost(false, false, NetworkCostType::Unrestricted),
            Some(false)
        );
    }

    #[test]
    fn fixed_and_variable_plans_are_metered() {
        assert_eq!(
            metered_from_cost(false, false, NetworkCostType::Fixed),
            Some(true)
        );
        assert_eq!(
            metered_from_cost(false, false, NetworkCostType::Variable),
            Some(true)
        );
    }

    #[test]
    fn unknown_cost_is_undetermined() {
        assert_eq!(
            metered_from_cost(false, false, NetworkCostType::Unknown),
            None
        );
    }

    #[test]
    fn roaming_overrides_unrestricted() {
        assert_eq!(
            metered_from_cost(true, false, NetworkCostType::Unrestricted),
            Some(true)
        );
    }

    #[test]
    fn over_data_limit_overrides_unknown() {
        assert_eq!(
            metered_from_cost(false, true, NetworkCostType::Unknown),
            Some(true)
        );
    }
}

#[test]
fn windows_probe_debug() {
    let debug_str = format!("{:?}", WindowsProbe::default());
    assert!(debug_str.contains("WindowsProbe"));
}
