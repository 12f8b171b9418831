//! Upgrade diffs between real manifests and the resulting gate verdicts.

#[cfg(test)]
mod tests {
    use crate::integration::{raw_function, reference_unit};
    use lapidary_runtime::Pipeline;
    use lp_01_inventory::RawUnit;
    use lp_05_manifest::{Manifest, MinimalEntry, MinimalManifest};
    use lp_07_diff::{
        banned_selectors, diff_manifests, evaluate_gate, FailureClass, GatePolicy, GateVerdict,
        OwnershipView,
    };
    use shared_types::PipelineConfig;
    use std::collections::BTreeMap;

    fn manifest_for(unit: &RawUnit) -> Manifest {
        Pipeline::new(PipelineConfig::default())
            .run(unit)
            .unwrap()
            .manifest
    }

    #[test]
    fn test_self_diff_is_empty_and_passes_strict() {
        let manifest = manifest_for(&reference_unit());
        let view = OwnershipView::from_manifest(&manifest);
        let banned = banned_selectors(&PipelineConfig::default());

        let report = diff_manifests(&view, &view, &banned);
        assert!(report.is_empty());
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::strict()),
            GateVerdict::Pass
        );
    }

    #[test]
    fn test_new_function_is_added_and_gated_by_policy() {
        let strict = manifest_for(&reference_unit());

        let mut upgraded = reference_unit();
        upgraded
            .functions
            .push(raw_function("upgradeToAndCall", &["address", "bytes"], "nonpayable"));
        let canary = manifest_for(&upgraded);

        let report = diff_manifests(
            &OwnershipView::from_manifest(&strict),
            &OwnershipView::from_manifest(&canary),
            &[],
        );
        assert_eq!(report.selector_adds["AdminFacet"].len(), 1);
        assert!(report.selector_removes.is_empty());
        assert!(report.new_collisions.is_empty());

        // additions are tolerated by the upgrade posture, fatal under strict
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::hazards_only()),
            GateVerdict::Pass
        );
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::strict()),
            GateVerdict::Fail {
                triggered: vec![FailureClass::Added]
            }
        );
    }

    #[test]
    fn test_mutability_change_moves_selector_between_facets() {
        // The selector hashes name and parameters only, so flipping a
        // function from nonpayable to view keeps the selector but reroutes
        // it from the core facet to the view facet.
        let before = RawUnit {
            name: "Treasury".to_string(),
            functions: vec![
                raw_function("pause", &[], "nonpayable"),
                raw_function("tallySupply", &[], "nonpayable"),
            ],
        };
        let after = RawUnit {
            name: "Treasury".to_string(),
            functions: vec![
                raw_function("pause", &[], "nonpayable"),
                raw_function("tallySupply", &[], "view"),
            ],
        };

        let report = diff_manifests(
            &OwnershipView::from_manifest(&manifest_for(&before)),
            &OwnershipView::from_manifest(&manifest_for(&after)),
            &[],
        );

        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.moved[0].from, vec!["CoreFacet"]);
        assert_eq!(report.moved[0].to, vec!["ViewFacet"]);
        assert_eq!(report.added_facets, vec!["ViewFacet"]);
        assert_eq!(report.removed_facets, vec!["CoreFacet"]);
        assert!(report.selector_adds.is_empty());
        assert!(report.selector_removes.is_empty());
    }

    #[test]
    fn test_banned_selector_in_canary_is_always_recorded() {
        // A hand-edited canary smuggling facets() into a generated module.
        let manifest = manifest_for(&reference_unit());
        let mut canary = MinimalManifest::from_manifest(&manifest);
        canary
            .facets
            .get_mut("ViewFacet")
            .unwrap()
            .selectors
            .push("0x7a0ed627".to_string());

        let strict = OwnershipView::from_minimal(&MinimalManifest::from_manifest(&manifest))
            .unwrap();
        let canary_view = OwnershipView::from_minimal(&canary).unwrap();
        let banned = banned_selectors(&PipelineConfig::default());

        let report = diff_manifests(&strict, &canary_view, &banned);
        assert_eq!(report.banned_in_canary.len(), 1);
        assert_eq!(report.banned_in_canary[0].owners, vec!["ViewFacet"]);

        // recorded even when the policy chooses not to fail on it
        let tolerant = GatePolicy {
            fail_on: [FailureClass::Collision].into_iter().collect(),
        };
        assert_eq!(evaluate_gate(Some(&report), &tolerant), GateVerdict::Pass);
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::hazards_only()),
            GateVerdict::Fail {
                triggered: vec![FailureClass::Banned]
            }
        );
    }

    #[test]
    fn test_first_deployment_has_no_reference() {
        assert_eq!(
            evaluate_gate(None, &GatePolicy::strict()),
            GateVerdict::NoReference
        );
    }

    #[test]
    fn test_cross_module_collision_in_canary() {
        // Two modules claiming one selector in a hand-built canary.
        let shared = "0x01020304".to_string();
        let canary = MinimalManifest {
            version: "1.0.0".to_string(),
            facets: BTreeMap::from([
                (
                    "CoreFacet".to_string(),
                    MinimalEntry {
                        selectors: vec![shared.clone()],
                    },
                ),
                (
                    "UtilFacet".to_string(),
                    MinimalEntry {
                        selectors: vec![shared],
                    },
                ),
            ]),
        };
        let strict = MinimalManifest {
            version: "1.0.0".to_string(),
            facets: BTreeMap::from([(
                "CoreFacet".to_string(),
                MinimalEntry {
                    selectors: vec!["0x01020304".to_string()],
                },
            )]),
        };

        let report = diff_manifests(
            &OwnershipView::from_minimal(&strict).unwrap(),
            &OwnershipView::from_minimal(&canary).unwrap(),
            &[],
        );
        assert_eq!(report.new_collisions.len(), 1);
        assert_eq!(
            report.new_collisions[0].owners,
            vec!["CoreFacet", "UtilFacet"]
        );
        assert_eq!(
            evaluate_gate(Some(&report), &GatePolicy::hazards_only()),
            GateVerdict::Fail {
                triggered: vec![FailureClass::Collision]
            }
        );

        let rendered = report.render();
        assert!(rendered.contains("collision 0x01020304"));
    }
}
