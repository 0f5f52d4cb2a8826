use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let args = std::env::args_os().skip(1).collect();
    cropme::run(args).context("cropme failed")
}
