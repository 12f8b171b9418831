//! Collaborator port choreography: compile, pack, then hand deployments
//! to the chain client in initialization order.

#[cfg(test)]
mod tests {
    use crate::integration::reference_unit;
    use lapidary_runtime::{
        ChainClientPort, CompileError, CompiledArtifact, CompilerPort, DryRunChainClient,
        FixtureCompiler, Pipeline, TxRequest,
    };
    use shared_types::PipelineConfig;

    const SOURCE: &str = "contract Treasury { /* elided */ }";

    fn compiler() -> FixtureCompiler {
        let mut compiler = FixtureCompiler::new();
        compiler.register(
            SOURCE,
            CompiledArtifact {
                unit: reference_unit(),
                init_code: vec![0x60, 0x00, 0x60, 0x00, 0xfd],
            },
        );
        compiler
    }

    #[tokio::test]
    async fn test_compile_pack_deploy_round() {
        let artifact = compiler().compile(SOURCE).await.unwrap();
        let output = Pipeline::new(PipelineConfig::default())
            .run(&artifact.unit)
            .unwrap();

        let client = DryRunChainClient::new();
        for name in &output.manifest.init_sequence {
            let module = output.modules.iter().find(|m| &m.name == name).unwrap();
            let receipt = client
                .submit(TxRequest {
                    to: None,
                    data: module.source.clone().into_bytes(),
                    label: format!("deploy {name}"),
                })
                .await
                .unwrap();
            assert!(receipt.success);
            assert!(receipt.deployed.is_some());
        }

        let transcript = client.transcript();
        assert_eq!(transcript.len(), output.manifest.init_sequence.len());
        assert_eq!(transcript[0].label, "deploy AdminFacet");
        assert_eq!(transcript[1].label, "deploy ViewFacet");
    }

    #[tokio::test]
    async fn test_unknown_source_aborts_before_packing() {
        let result = compiler().compile("contract Unknown {}").await;
        assert!(matches!(result, Err(CompileError::UnknownUnit { .. })));
    }
}
