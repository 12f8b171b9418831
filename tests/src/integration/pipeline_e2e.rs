//! Full pipeline runs: ABI-shaped unit in, manifest and artifacts out.

#[cfg(test)]
mod tests {
    use crate::integration::{raw_function, reference_unit};
    use lapidary_runtime::Pipeline;
    use lp_01_inventory::RawUnit;
    use lp_05_manifest::{
        load_manifest, load_minimal, save_manifest, save_minimal, ManifestError, MerkleTree,
        MinimalManifest,
    };
    use shared_types::{PipelineConfig, Selector};
    use std::collections::BTreeSet;

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default())
    }

    #[test]
    fn test_reference_unit_packs_to_admin_and_view_facets() {
        let output = pipeline().run(&reference_unit()).unwrap();
        let manifest = &output.manifest;

        assert_eq!(manifest.facets.len(), 2);
        assert_eq!(manifest.facets["AdminFacet"].selectors.len(), 5);
        assert_eq!(manifest.facets["ViewFacet"].selectors.len(), 20);

        // 25 functions, 25 distinct selectors
        let unique: BTreeSet<Selector> = manifest
            .facets
            .values()
            .flat_map(|entry| entry.selectors.iter().copied())
            .collect();
        assert_eq!(unique.len(), 25);

        // administrative module initializes before the read-only one
        assert_eq!(manifest.init_sequence, vec!["AdminFacet", "ViewFacet"]);
    }

    #[test]
    fn test_every_proof_verifies_against_the_root() {
        let output = pipeline().run(&reference_unit()).unwrap();
        let manifest = &output.manifest;

        assert_eq!(manifest.proofs.len(), 25);
        for proof in manifest.proofs.values() {
            assert!(MerkleTree::verify_path(
                &proof.leaf_hash,
                &proof.path,
                &manifest.root
            ));
        }
    }

    #[test]
    fn test_45_unmatched_functions_split_into_20_20_5() {
        let unit = RawUnit {
            name: "Engine".to_string(),
            functions: (0..45)
                .map(|i| raw_function(&format!("performStep{i}"), &["uint256"], "nonpayable"))
                .collect(),
        };
        let output = pipeline().run(&unit).unwrap();

        let sizes: Vec<usize> = output
            .manifest
            .init_sequence
            .iter()
            .map(|name| output.manifest.facets[name].selectors.len())
            .collect();
        assert_eq!(
            output.manifest.init_sequence,
            vec!["CoreFacetA", "CoreFacetB", "CoreFacetC"]
        );
        assert_eq!(sizes, vec![20, 20, 5]);

        // completeness: every input function ends up in exactly one module
        let packed: Vec<String> = output
            .modules
            .iter()
            .flat_map(|m| m.functions.iter().map(|f| f.name.clone()))
            .collect();
        let expected: Vec<String> = (0..45).map(|i| format!("performStep{i}")).collect();
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_packing_completeness_over_random_inventory_sizes() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let count: usize = rng.gen_range(1..=120);
            let unit = RawUnit {
                name: "Engine".to_string(),
                functions: (0..count)
                    .map(|i| raw_function(&format!("performStep{i}"), &[], "nonpayable"))
                    .collect(),
            };
            let output = pipeline().run(&unit).unwrap();

            // every function packed exactly once, original order preserved
            let packed: Vec<String> = output
                .modules
                .iter()
                .flat_map(|m| m.functions.iter().map(|f| f.name.clone()))
                .collect();
            let expected: Vec<String> = (0..count).map(|i| format!("performStep{i}")).collect();
            assert_eq!(packed, expected);
            assert_eq!(output.modules.len(), count.div_ceil(20));
        }
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let a = pipeline().run(&reference_unit()).unwrap();
        let b = pipeline().run(&reference_unit()).unwrap();

        assert_eq!(a.manifest.root, b.manifest.root);
        assert_eq!(
            serde_json::to_string(&a.manifest).unwrap(),
            serde_json::to_string(&b.manifest).unwrap()
        );
    }

    #[test]
    fn test_artifacts_persist_and_reload() {
        let output = pipeline().run(&reference_unit()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let extended = dir.path().join("manifest.json");
        save_manifest(&output.manifest, &extended).unwrap();
        assert_eq!(load_manifest(&extended).unwrap(), output.manifest);

        let minimal_path = dir.path().join("manifest.min.json");
        let minimal = MinimalManifest::from_manifest(&output.manifest);
        save_minimal(&minimal, &minimal_path).unwrap();
        assert_eq!(load_minimal(&minimal_path, Some("1.0.0")).unwrap(), minimal);
        assert!(matches!(
            load_minimal(&minimal_path, Some("9.9.9")),
            Err(ManifestError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_generated_sources_carry_isolated_storage() {
        let output = pipeline().run(&reference_unit()).unwrap();

        let slots: BTreeSet<_> = output.modules.iter().map(|m| m.storage_slot).collect();
        assert_eq!(slots.len(), output.modules.len());
        for module in &output.modules {
            assert!(module.source.contains("STORAGE_SLOT"));
            assert!(!module.source.contains("constructor"));
        }
    }
}
