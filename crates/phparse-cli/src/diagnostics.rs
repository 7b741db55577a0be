use owo_colors::OwoColorize;
use phparse_syntax::error::Error;

/// 1-based column of byte `offset`, counted in characters.
fn column_at(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    let line_start = source
        .get(..offset)
        .and_then(|s| s.rfind('\n'))
        .map(|i| i + 1)
        .unwrap_or(0);
    source
        .get(line_start..offset)
        .map(|s| s.chars().count())
        .unwrap_or(0)
        + 1
}

pub fn render_error(kind: &str, source: &str, file: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let Some(line) = err.line {
        let col = err.offset.map(|o| column_at(source, o)).unwrap_or(1);
        eprintln!("  --> {}:{}:{}", file, line, col);
        if let Some(src_line) = source.lines().nth(line - 1) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            marker.push_str(&" ".repeat(col - 1));
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
    provide_error_suggestions(&err.msg);
}

fn provide_error_suggestions(err_msg: &str) {
    if err_msg.contains("unterminated string") {
        eprintln!("{}", "Help: String is missing its closing quote.".yellow());
        eprintln!("    {}", "Make sure every \" or ' has a matching closing quote".bright_black());
    } else if err_msg.contains("unterminated comment") {
        eprintln!("{}", "Help: Block comment is missing its closing */.".yellow());
    } else if err_msg.contains("expected ';'") {
        eprintln!("{}", "Help: Did you forget a ';' at the end of the previous statement?".yellow());
    } else if err_msg.contains("expected ')'") {
        eprintln!("{}", "Help: Check if parentheses are balanced.".yellow());
    } else if err_msg.contains("expected statement") {
        eprintln!("{}", "Help: Only assignments, echo, if, function definitions, calls and blocks are supported here.".yellow());
    } else if err_msg.contains("unexpected character") {
        eprintln!("{}", "Help: This character cannot start a PHP token.".yellow());
    } else if err_msg.contains("expected variable name") {
        eprintln!("{}", "Help: Variables are written as $name.".yellow());
        eprintln!("    {}", "Example: $count = 1;".bright_black());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_at() {
        let src = "<?php\n  $é = 1;";
        assert_eq!(column_at(src, 0), 1);
        assert_eq!(column_at(src, 8), 3);
        // after the two-byte 'é'
        assert_eq!(column_at(src, 11), 5);
        assert_eq!(column_at(src, 1000), 10);
    }
}
