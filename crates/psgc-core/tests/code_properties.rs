//! Property tests for PSGC code arithmetic.

use proptest::prelude::*;

use psgc_core::{ancestor_prefix, resolve_island_group, CodeDepth, IslandGroup, PsgcCode};

fn any_code() -> impl Strategy<Value = PsgcCode> {
    "[0-9]{9}".prop_map(|s| PsgcCode::new(s).unwrap())
}

proptest! {
    #[test]
    fn region_prefix_is_first_two_digits_padded(code in any_code()) {
        let prefix = ancestor_prefix(&code, CodeDepth::Region);
        prop_assert_eq!(prefix.as_str().len(), 9);
        prop_assert_eq!(&prefix.as_str()[..2], &code.as_str()[..2]);
        prop_assert_eq!(&prefix.as_str()[2..], "0000000");
    }

    #[test]
    fn prefix_is_idempotent(code in any_code()) {
        for depth in [CodeDepth::Region, CodeDepth::ProvinceOrDistrict, CodeDepth::Locality] {
            let once = ancestor_prefix(&code, depth);
            let twice = ancestor_prefix(&once, depth);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn coarser_prefix_of_finer_prefix_agrees(code in any_code()) {
        let locality = ancestor_prefix(&code, CodeDepth::Locality);
        prop_assert_eq!(
            ancestor_prefix(&locality, CodeDepth::ProvinceOrDistrict),
            ancestor_prefix(&code, CodeDepth::ProvinceOrDistrict)
        );
    }

    #[test]
    fn prefix_depth_never_exceeds_requested(code in any_code()) {
        let prefix = ancestor_prefix(&code, CodeDepth::ProvinceOrDistrict);
        prop_assert!(prefix.depth() <= CodeDepth::ProvinceOrDistrict);
    }

    #[test]
    fn island_group_resolution_is_total_or_explicit(code in any_code()) {
        match resolve_island_group(&code) {
            Ok(group) => prop_assert!(IslandGroup::ALL.contains(&group)),
            Err(err) => prop_assert!(err.to_string().contains("island group")),
        }
    }

    #[test]
    fn malformed_width_is_rejected(s in "[0-9]{0,8}|[0-9]{10,12}") {
        prop_assert!(PsgcCode::new(s).is_err());
    }
}
