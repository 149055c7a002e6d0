use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Examples:
      # Print a snapshot as blockfile text
      %BINARY_NAME% decode run/snap-0042 > snap-0042.blk

      # Summarize a snapshot and validate its partition metadata
      %BINARY_NAME% info run/snap-0042

      # Rewrite the partition metadata for 256 ranks (other files are hard-linked)
      %BINARY_NAME% repartition run/snap-0042 256 run/snap-0042-256

      # Same, but copy the unchanged files instead of linking them
      %BINARY_NAME% repartition run/snap-0042 256 run/snap-0042-256 --copy

      # Show progress on stderr
      RUST_LOG=info %BINARY_NAME% repartition run/snap-0042 64 run/snap-0042-64
"#};
