//! Shared fixtures for the integration suites.

#![allow(dead_code)] // each suite uses a subset

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use power_hint_daemon::core::errors::Result;
use power_hint_daemon::monitor::Monitor;
use power_hint_daemon::platform::registry::{
    IpcRegistry, IpcService, SchedulingPolicy, ServeOutcome, ServiceHandle,
};
use power_hint_daemon::platform::shutdown::ShutdownToken;

/// One observed registry interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    SetSchedulingPriority {
        descriptor: &'static str,
        niceness: i32,
    },
    SetExtension {
        host: &'static str,
        ext: &'static str,
    },
    AddService {
        instance: String,
    },
}

/// Registry fake recording every call in order. `serve` returns immediately.
#[derive(Default)]
pub struct RecordingRegistry {
    calls: Mutex<Vec<RegistryCall>>,
}

impl RecordingRegistry {
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().clone()
    }
}

impl IpcRegistry for RecordingRegistry {
    fn add_service(&self, _handle: ServiceHandle, instance: &str) -> Result<()> {
        self.calls.lock().push(RegistryCall::AddService {
            instance: instance.to_string(),
        });
        Ok(())
    }

    fn set_extension(&self, host: &ServiceHandle, ext: ServiceHandle) -> Result<()> {
        self.calls.lock().push(RegistryCall::SetExtension {
            host: host.descriptor(),
            ext: ext.descriptor(),
        });
        host.attach_extension(ext)
    }

    fn set_scheduling_priority(
        &self,
        handle: &ServiceHandle,
        _policy: SchedulingPolicy,
        niceness: i32,
    ) {
        self.calls.lock().push(RegistryCall::SetSchedulingPriority {
            descriptor: handle.descriptor(),
            niceness,
        });
    }

    fn serve(&self, _cancel: &ShutdownToken) -> ServeOutcome {
        ServeOutcome::Disconnected
    }
}

/// Monitor fake counting start calls.
#[derive(Default)]
pub struct CountingMonitor {
    starts: AtomicUsize,
}

impl CountingMonitor {
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }
}

impl Monitor for CountingMonitor {
    fn start(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Minimal valid hint config; `adpf` adds an extended-profile entry.
pub fn hint_config_json(adpf: bool) -> String {
    let adpf_section = if adpf {
        r#", "AdpfConfig": [{ "Name": "REFRESH_120FPS" }]"#
    } else {
        ""
    };
    format!(
        r#"{{
            "Nodes": [{{
                "Name": "CPUClusterMaxFreq",
                "Path": "/sys/devices/system/cpu/cpufreq/policy0/scaling_max_freq",
                "Values": ["9999999", "1512000"],
                "ResetOnInit": true
            }}],
            "Actions": [{{
                "PowerHint": "INTERACTION",
                "Node": "CPUClusterMaxFreq",
                "Duration": 0,
                "Value": "9999999"
            }}]{adpf_section}
        }}"#
    )
}

/// Write `powerhint.json` (the named-mode default filename) under `dir`.
pub fn write_default_config(dir: &Path, adpf: bool) -> PathBuf {
    let path = dir.join("powerhint.json");
    fs::write(&path, hint_config_json(adpf)).expect("write hint config fixture");
    path
}
