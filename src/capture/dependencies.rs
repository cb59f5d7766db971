use std::{path::Path, sync::Arc};

use crate::capture::{
    clipboard::{self, Selection},
    command,
    types::CaptureError,
};

pub const SCROT: &str = "scrot";
pub const SCP: &str = "scp";

/// Interactive region capture into a file.
pub trait CaptureTool: Send + Sync {
    fn capture_region(&self, output: &Path) -> Result<(), CaptureError>;
}

/// Copies a local file to `host:dir`.
pub trait TransferTool: Send + Sync {
    fn transfer(&self, local: &Path, remote: &str) -> Result<(), CaptureError>;
}

/// Places text into one of the desktop selections.
pub trait ClipboardTool: Send + Sync {
    fn copy(&self, selection: Selection, text: &str) -> Result<(), CaptureError>;
}

/// Opens a URL in the user's browser.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), CaptureError>;
}

/// Bundle of external collaborators used by the pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct PipelineDependencies {
    pub capture: Arc<dyn CaptureTool>,
    pub transfer: Arc<dyn TransferTool>,
    pub clipboard: Arc<dyn ClipboardTool>,
    pub browser: Arc<dyn BrowserLauncher>,
}

impl Default for PipelineDependencies {
    fn default() -> Self {
        Self {
            capture: Arc::new(Scrot),
            transfer: Arc::new(Scp),
            clipboard: Arc::new(Xsel),
            browser: Arc::new(SystemBrowser),
        }
    }
}

struct Scrot;
struct Scp;
struct Xsel;
struct SystemBrowser;

impl CaptureTool for Scrot {
    fn capture_region(&self, output: &Path) -> Result<(), CaptureError> {
        command::run_quiet(SCROT, [Path::new("-s"), output]).map_err(CaptureError::CaptureTool)
    }
}

impl TransferTool for Scp {
    fn transfer(&self, local: &Path, remote: &str) -> Result<(), CaptureError> {
        command::run_quiet(SCP, [local, Path::new(remote)]).map_err(CaptureError::UploadTool)
    }
}

impl ClipboardTool for Xsel {
    fn copy(&self, selection: Selection, text: &str) -> Result<(), CaptureError> {
        clipboard::copy_via_xsel(selection, text)
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), CaptureError> {
        // Detached: the browser is not waited for and keeps its own focus policy.
        open::that_detached(url).map_err(|e| CaptureError::Browser(e.to_string()))
    }
}
