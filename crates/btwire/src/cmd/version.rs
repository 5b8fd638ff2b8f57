use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("btwire {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: btwire");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", target_triple());
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "features: scanner={}, cli=true",
        cfg!(feature = "scanner")
    );
    println!(
        "apcf_opcode: 0x{:04x}",
        btwire_apcf::HCI_VENDOR_APCF_OPCODE
    );

    Ok(SUCCESS)
}

fn target_triple() -> String {
    if let Some(target) = option_env!("BTWIRE_BUILD_TARGET") {
        return target.to_string();
    }
    format!(
        "{}-unknown-{}",
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_looks_like_triple() {
        assert!(target_triple().split('-').count() >= 3);
    }
}
