#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bundle_defaults() {
        let cli = Cli::try_parse_from(["isle", "bundle", "dist"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.quiet);

        let Command::Bundle(args) = cli.command else {
            panic!("expected bundle command");
        };
        assert_eq!(args.dir, PathBuf::from("dist"));
        assert_eq!(args.assets_dir, None);
        assert!(!args.keep_modules);
        assert!(!args.dry_run);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_bundle_flags() {
        let cli = Cli::try_parse_from([
            "isle",
            "bundle",
            "build",
            "--assets-dir",
            "assets",
            "--keep-modules",
            "--dry-run",
            "--config",
            "site/isle.config.json",
        ])
        .unwrap();

        let Command::Bundle(args) = cli.command else {
            panic!("expected bundle command");
        };
        assert_eq!(args.assets_dir.as_deref(), Some("assets"));
        assert!(args.keep_modules);
        assert!(args.dry_run);
        assert_eq!(args.config, Some(PathBuf::from("site/isle.config.json")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["isle", "bundle", "dist", "-v", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["isle", "-v", "-q", "bundle", "dist"]).is_err());
    }

    #[test]
    fn test_bundle_requires_dir() {
        assert!(Cli::try_parse_from(["isle", "bundle"]).is_err());
    }

    #[test]
    fn test_schema_command() {
        let cli = Cli::try_parse_from(["isle", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema));
    }
}
