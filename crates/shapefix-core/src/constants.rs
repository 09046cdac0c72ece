//! Defaults shared by configuration, rules and logging

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILENAME: &str = "shapefix.toml";

/// Prefix for environment overrides (`SHAPEFIX_DRY_RUN=true`)
pub const CONFIG_ENV_PREFIX: &str = "SHAPEFIX";

/// Separator for nested keys in environment overrides (`SHAPEFIX_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV_VAR: &str = "SHAPEFIX_LOG";

/// Log level used when neither config nor `SHAPEFIX_LOG` set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server action modules whose result objects predate the `success` flag
pub const DEFAULT_TARGET_FILES: &[&str] = &[
    "app/(main)/dashboard/warehouse/category-actions.ts",
    "app/(main)/dashboard/warehouse/actions.ts",
];

/// Keyword that introduces the object literals being tagged
pub const DEFAULT_RETURN_KEYWORD: &str = "return";

/// Field added to every result object
pub const DEFAULT_TAG_FIELD: &str = "success";

/// Import added to modules that build `ActionResult` values
pub const DEFAULT_IMPORT_LINE: &str = r#"import { type ActionResult } from "@/lib/types";"#;

/// Pattern for any existing `ActionResult` import from `@/lib/types`: plain,
/// inline `type`, or `import type { ... }`
pub const DEFAULT_IMPORT_MARKER: &str =
    r#"\bimport\s+(?:type\s+)?\{[^}]*\bActionResult\b[^}]*\}\s*from\s*["']@/lib/types["']"#;

/// Line after which the import is inserted
pub const DEFAULT_IMPORT_ANCHOR: &str = r#"^import\s*\{\s*z\s*\}\s*from\s*["']zod["'];?"#;
