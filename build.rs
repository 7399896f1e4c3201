//! Build script: embed the git hash and pre-flight GPU feature flags.
//!
//! Verifies that required toolkits are installed before whisper-rs-sys tries
//! to compile, so feature misconfiguration fails with a readable message.

use std::process::Command;

fn main() {
    // Embed git short hash for version string
    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    if cfg!(feature = "cuda") {
        check_cuda();
    }
    if cfg!(feature = "vulkan") {
        check_vulkan();
    }
}

fn check_cuda() {
    match Command::new("nvcc").arg("--version").output() {
        Ok(out) if out.status.success() => {}
        _ => {
            println!(
                "cargo::warning=CUDA feature enabled but 'nvcc' was not found on PATH. \
                 Install the CUDA toolkit or build without '--features cuda'."
            );
        }
    }
}

fn check_vulkan() {
    match Command::new("vulkaninfo").arg("--summary").output() {
        Ok(out) if out.status.success() => {}
        _ => {
            println!(
                "cargo::warning=Vulkan feature enabled but 'vulkaninfo' was not found on PATH. \
                 Install the Vulkan SDK or build without '--features vulkan'."
            );
        }
    }
}
