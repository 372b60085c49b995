//! Platform command implementation

use crate::error::{Result, platform as platform_error};
use crate::platform::Resolution;
use crate::platform::detection::{detect_host, host_arch_name, host_os_name};
use crate::ui::display::{self, display_field};

/// Print the detected platform
pub fn run() -> Result<()> {
    display::heading("Platform");
    display_field!("Host:", format!("{} {}", host_os_name(), host_arch_name()));

    match detect_host() {
        Resolution::Resolved(platform) => {
            display_field!("Tag:", platform.tag());
            display_field!("Library extension:", platform.library_extension());
        }
        Resolution::NeedsOperatorChoice { os, arch } => {
            display::warning(&platform_error::unknown(&os, &arch).to_string());
            display::detail("Setup will ask for a platform, or pass --platform <TAG>");
        }
    }
    Ok(())
}
