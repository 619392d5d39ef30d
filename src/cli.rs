use std::path::PathBuf;

use clap::Parser;

use crate::demo::DemoDialog;

#[derive(Parser, Debug)]
#[command(name = "dialoghost", version, about = "Modal dialogs with a focus trap, in the terminal")]
pub struct Args {
    /// Dialog to open on start
    #[arg(short, long, value_enum)]
    pub dialog: Option<DemoDialog>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Ticks per second
    #[arg(long, default_value_t = 4.0)]
    pub tick_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["dialoghost"]);
        assert_eq!(args.dialog, None);
        assert!(args.config.is_none());
        assert!((args.frame_rate - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dialog_flag() {
        let args = Args::parse_from(["dialoghost", "--dialog", "open-bot"]);
        assert_eq!(args.dialog, Some(DemoDialog::OpenBot));
        assert!(Args::try_parse_from(["dialoghost", "--dialog", "nope"]).is_err());
    }
}
