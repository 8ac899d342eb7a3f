mod deploy;
mod synth;
mod validate;

pub use deploy::cmd_deploy;
pub use synth::cmd_synth;
pub use validate::cmd_validate;
