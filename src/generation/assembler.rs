//! Output assembly: imports, blank line, decorators, body

/// Join the three sections in fixed order.
///
/// Blank lines inside the imports or decorators block are dropped, and an
/// empty block is omitted entirely, so the output never starts with a stray
/// blank line.
pub fn assemble(imports_block: &str, decorators_block: &str, body: &str) -> String {
    let imports = non_blank_lines(imports_block);
    let decorators = non_blank_lines(decorators_block);

    let mut header = String::new();
    if !imports.is_empty() {
        header.push_str(&imports.join("\n"));
        header.push_str("\n\n");
    }
    if !decorators.is_empty() {
        header.push_str(&decorators.join("\n"));
        header.push('\n');
    }

    debug_assert!(
        !header.starts_with('\n') && !header.contains("\n\n\n"),
        "assembled header must not contain stray blank lines: {header:?}"
    );

    let mut output = header;
    output.push_str(body);
    output
}

fn non_blank_lines(block: &str) -> Vec<&str> {
    block.lines().filter(|line| !line.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections() {
        assert_eq!(
            assemble("import os", "@dataclass", "class A:\n    pass"),
            "import os\n\n@dataclass\nclass A:\n    pass"
        );
    }

    #[test]
    fn test_empty_imports_leave_no_blank_line() {
        assert_eq!(assemble("", "@a\n@b", "class A: pass"), "@a\n@b\nclass A: pass");
    }

    #[test]
    fn test_empty_decorators() {
        assert_eq!(
            assemble("import asyncio", "", "async def f(): pass"),
            "import asyncio\n\nasync def f(): pass"
        );
    }

    #[test]
    fn test_body_only() {
        assert_eq!(assemble("", "", "def f(): pass"), "def f(): pass");
        assert_eq!(assemble("\n", "  ", "def f(): pass"), "def f(): pass");
    }

    #[test]
    fn test_blank_entries_leave_no_leading_newline() {
        let output = assemble("\nimport os", "\n@a", "def f():\n    pass");
        assert_eq!(output, "import os\n\n@a\ndef f():\n    pass");
        assert!(!output.starts_with('\n'));

        let output = assemble("", "\n\n@a", "x");
        assert_eq!(output, "@a\nx");
    }

    #[test]
    fn test_trailing_newlines_on_blocks_are_normalized() {
        assert_eq!(
            assemble("import os\n", "@a\n", "x"),
            "import os\n\n@a\nx"
        );
    }
}
