//! Platform × transport binding table.
//!
//! Every supported pair is monomorphised here once; the pipeline itself
//! only ever sees one concrete `VPort` and `ProtocolApi` per call. A pair
//! missing from the table has no frame-compatible API and is reported as
//! [`ConfigError::IncompatibleTransport`].

use serde_yaml::Value;
use tion_adapter_host_memory::MemoryHost;
use tion_adapter_protocol::{TionApi3s, TionApiLt, TionApiO2};
use tion_adapter_vport::{BleVPort, UartVPort};
use tion_app::compiler::compile_block;
use tion_app::error::SourceError;
use tion_app::graph::ObjectGraph;
use tion_app::ports::{Host, IdentifierRegistry};
use tion_app::schema::validate_document;
use tion_domain::config::{TionConfig, VPortConfig};
use tion_domain::error::{CompileError, ConfigError};
use tion_domain::platform::{Platform, VPortKind};

use crate::report::{BlockReport, Report};

/// Compile one validated block against the transport it is bound to.
///
/// # Errors
///
/// Returns [`ConfigError::IncompatibleTransport`] when the platform has no
/// API for the transport's frame format, or whatever the pipeline reports.
pub fn compile_config<H: Host + ?Sized>(
    config: &TionConfig,
    vport: &VPortConfig,
    host: &mut H,
) -> Result<ObjectGraph, ConfigError> {
    match (config.platform, vport.kind) {
        (Platform::Tion3s, VPortKind::Ble) => {
            compile_block::<BleVPort, TionApi3s, H>(config, vport, host)
        }
        (Platform::Tion3s, VPortKind::Uart) => {
            compile_block::<UartVPort, TionApi3s, H>(config, vport, host)
        }
        (Platform::TionLt, VPortKind::Ble) => {
            compile_block::<BleVPort, TionApiLt, H>(config, vport, host)
        }
        (Platform::TionLt, VPortKind::Uart) => {
            compile_block::<UartVPort, TionApiLt, H>(config, vport, host)
        }
        (Platform::TionO2, VPortKind::Uart) => {
            compile_block::<UartVPort, TionApiO2, H>(config, vport, host)
        }
        (platform, kind) => Err(ConfigError::IncompatibleTransport {
            platform,
            vport: kind,
        }),
    }
}

/// Pick the block's transport among the declared ones, then compile.
///
/// # Errors
///
/// Returns [`ConfigError`] when the transport reference cannot be resolved
/// or the block cannot be compiled against it.
pub fn compile_bound<H: Host + ?Sized>(
    config: &TionConfig,
    vports: &[VPortConfig],
    host: &mut H,
) -> Result<ObjectGraph, ConfigError> {
    let vport = VPortConfig::select(vports, config.vport_id.as_ref())?;
    compile_config(config, vport, host)
}

/// Validate and compile a whole document with a fresh host.
///
/// Declared transports take their identifiers first so no block can reuse
/// one. Each block is then compiled on its own; a failing block is kept in
/// the report and does not stop the others.
///
/// # Errors
///
/// Returns [`SourceError`] when the document as a whole is malformed.
#[tracing::instrument(skip_all)]
pub fn compile_document(tree: &Value) -> Result<Report, SourceError> {
    let document = validate_document(tree)?;
    let mut host = MemoryHost::new();
    for vport in &document.vports {
        host.claim(&vport.id)?;
    }

    let blocks = document
        .blocks
        .into_iter()
        .map(|block| {
            let result = block.map_err(CompileError::from).and_then(|config| {
                compile_bound(&config, &document.vports, &mut host).map_err(CompileError::from)
            });
            if let Err(err) = &result {
                tracing::warn!(error = %err, "device block not compiled");
            }
            BlockReport::from(result)
        })
        .collect();
    Ok(Report::new(blocks))
}

/// Validate a whole document without compiling it.
///
/// # Errors
///
/// Returns [`SourceError`] when the document as a whole is malformed.
pub fn validate_only(tree: &Value) -> Result<Report, SourceError> {
    let document = validate_document(tree)?;
    let blocks = document
        .blocks
        .into_iter()
        .map(|block| BlockReport::validated(block.map_err(CompileError::from)))
        .collect();
    Ok(Report::new(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tion_app::schema::{parse, validate};
    use tion_domain::id::Id;

    fn vport(id: &str, kind: VPortKind) -> VPortConfig {
        VPortConfig {
            id: Id::parse(id).unwrap(),
            kind,
        }
    }

    fn config(text: &str) -> TionConfig {
        validate(&parse(text).unwrap()).unwrap()
    }

    #[test]
    fn should_bind_every_supported_pair() {
        let pairs = [
            ("tion_3s", VPortKind::Ble, "dentra::tion::TionApi3s"),
            ("tion_3s", VPortKind::Uart, "dentra::tion::TionApi3s"),
            ("tion_lt", VPortKind::Ble, "dentra::tion::TionApiLt"),
            ("tion_lt", VPortKind::Uart, "dentra::tion::TionApiLt"),
            ("tion_o2", VPortKind::Uart, "dentra::tion::TionApiO2"),
        ];
        for (platform, kind, api) in pairs {
            let mut host = MemoryHost::new();
            let config = config(&format!("{{platform: {platform}}}"));
            let graph = compile_config(&config, &vport("port", kind), &mut host).unwrap();
            assert!(graph.api.class.ends_with(&format!("{api}>")), "{platform}");
            assert_eq!(graph.vport.kind, kind);
        }
    }

    #[test]
    fn should_refuse_o2_over_ble() {
        let mut host = MemoryHost::new();
        let config = config("{platform: tion_o2}");
        let err = compile_config(&config, &vport("port", VPortKind::Ble), &mut host).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IncompatibleTransport {
                platform: Platform::TionO2,
                vport: VPortKind::Ble,
            }
        );
    }

    #[test]
    fn should_bind_referenced_transport() {
        let mut host = MemoryHost::new();
        let vports = [
            vport("tion_ble", VPortKind::Ble),
            vport("tion_uart", VPortKind::Uart),
        ];
        let config = config("{vport_id: tion_uart}");
        let graph = compile_bound(&config, &vports, &mut host).unwrap();
        assert_eq!(graph.vport.id.as_str(), "tion_uart");
    }

    #[test]
    fn should_require_reference_among_several_transports() {
        let mut host = MemoryHost::new();
        let vports = [
            vport("tion_ble", VPortKind::Ble),
            vport("tion_uart", VPortKind::Uart),
        ];
        let err = compile_bound(&config("{}"), &vports, &mut host).unwrap_err();
        assert_eq!(err, ConfigError::AmbiguousVPort);
    }

    #[test]
    fn should_compile_each_block_of_a_document() {
        let tree = parse(
            "vport: [{id: tion_ble, type: ble}]\n\
             tion:\n  - {id: hall}\n  - {id: bedroom, presets: {boost: {}}}\n",
        )
        .unwrap();
        let report = compile_document(&tree).unwrap();
        assert_eq!(report.blocks.len(), 2);
        assert_eq!(report.failed(), 0);
        assert_eq!(
            report.build_flags,
            vec!["-DTION_ENABLE_PRESETS".to_string(), "-DTION_ESPHOME".to_string()]
        );
    }

    #[test]
    fn should_keep_compiling_after_failed_block() {
        let tree = parse(
            "vport: [{id: tion_ble, type: ble}]\n\
             tion:\n  - {presets: {sauna: {}}}\n  - {id: hall}\n",
        )
        .unwrap();
        let report = compile_document(&tree).unwrap();
        assert_eq!(report.failed(), 1);
        assert!(matches!(&report.blocks[0], BlockReport::Failed { error, .. } if error.contains("sauna")));
        assert!(matches!(&report.blocks[1], BlockReport::Compiled { .. }));
    }

    #[test]
    fn should_refuse_block_reusing_transport_id() {
        let tree = parse(
            "vport: [{id: tion_ble, type: ble}, {id: tion_uart, type: uart}]\n\
             tion: [{id: tion_uart, vport_id: tion_ble}]\n",
        )
        .unwrap();
        let report = compile_document(&tree).unwrap();
        assert!(matches!(&report.blocks[0], BlockReport::Failed { error, .. } if error.contains("tion_uart")));
    }

    #[test]
    fn should_not_leak_ids_of_failed_block() {
        let tree = parse(
            "vport: [{id: tion_ble, type: ble}]\n\
             tion: [{id: dev1, buzzer: {id: tion_ble}}, {id: dev1}]\n",
        )
        .unwrap();
        let report = compile_document(&tree).unwrap();
        assert!(matches!(&report.blocks[0], BlockReport::Failed { error, .. } if error.contains("tion_ble")));
        let BlockReport::Compiled { graph } = &report.blocks[1] else {
            panic!("second block should compile");
        };
        assert_eq!(graph.device.id.as_str(), "dev1");
    }

    #[test]
    fn should_share_namespace_between_blocks() {
        let tree = parse(
            "vport: [{id: tion_ble, type: ble}]\n\
             tion: [{buzzer: {}}, {buzzer: {}}]\n",
        )
        .unwrap();
        let report = compile_document(&tree).unwrap();
        let ids: Vec<_> = report
            .blocks
            .iter()
            .filter_map(|block| match block {
                BlockReport::Compiled { graph } => graph.entity("buzzer").map(|e| e.id.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["tion_switch".to_string(), "tion_switch_2".to_string()]);
    }

    #[test]
    fn should_validate_without_compiling() {
        let tree = parse("tion: [{id: hall}, {presets: {sauna: {}}}]").unwrap();
        let report = validate_only(&tree).unwrap();
        assert_eq!(report.failed(), 1);
        assert!(matches!(&report.blocks[0], BlockReport::Valid));
    }
}
