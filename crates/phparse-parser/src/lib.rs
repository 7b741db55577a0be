pub mod parser;

pub use parser::Parser;

use phparse_syntax::ast::Program;
use phparse_syntax::error::Error;

/// Parse a whole PHP input. Returns the nodes parsed before the first error,
/// and the errors; the error list is empty on success.
pub fn parse(input: &str) -> (Program, Vec<Error>) {
    parse_file(input, "")
}

/// Like [`parse`], labelling positions with `file`.
pub fn parse_file(input: &str, file: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(input, file);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phparse_syntax::ast::*;

    fn parse_ok(input: &str) -> Vec<Stmt> {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        program.nodes
    }

    fn string(text: &str) -> Expr {
        Expr::Literal(Literal::new(LiteralType::String, text))
    }

    fn float(text: &str) -> Expr {
        Expr::Literal(Literal::new(LiteralType::Float, text))
    }

    fn echo(text: &str) -> Stmt {
        Stmt::Echo(string(text))
    }

    #[test]
    fn test_html_only() {
        let input = "<html>\n  <body>hi</body>\n</html>\n";
        assert_eq!(parse_ok(input), vec![echo(input)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ok("").is_empty());
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            parse_ok("<?php $x = 1; ?>"),
            vec![Stmt::Assignment {
                assignee: Identifier::new("x"),
                value: float("1"),
            }]
        );
    }

    #[test]
    fn test_echo_string() {
        assert_eq!(parse_ok("<?php echo \"hi\"; ?>"), vec![echo("\"hi\"")]);
    }

    #[test]
    fn test_function() {
        assert_eq!(
            parse_ok("<?php function f($a, $b) { } ?>"),
            vec![Stmt::Function(Function {
                name: "f".to_string(),
                params: vec![Identifier::new("a"), Identifier::new("b")],
                body: Block::default(),
            })]
        );
    }

    #[test]
    fn test_function_without_params() {
        let nodes = parse_ok("<?php function greet() { echo 'hello'; } ?>");
        if let [Stmt::Function(f)] = nodes.as_slice() {
            assert_eq!(f.name, "greet");
            assert!(f.params.is_empty());
            assert_eq!(f.body.statements, vec![echo("'hello'")]);
        } else {
            panic!("Expected one function, got {:?}", nodes);
        }
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            parse_ok("<?php if (true) { echo \"y\"; } else { echo \"n\"; } ?>"),
            vec![Stmt::If {
                condition: Expr::Literal(Literal::new(LiteralType::Boolean, "true")),
                then_branch: Box::new(Stmt::Block(Block {
                    statements: vec![echo("\"y\"")],
                })),
                else_branch: Box::new(Stmt::Block(Block {
                    statements: vec![echo("\"n\"")],
                })),
            }]
        );
    }

    #[test]
    fn test_if_without_else() {
        let nodes = parse_ok("<?php if ($ok) echo 1; echo 2;");
        assert_eq!(
            nodes,
            vec![
                Stmt::If {
                    condition: Expr::Unknown,
                    then_branch: Box::new(Stmt::Echo(float("1"))),
                    else_branch: Box::new(Stmt::Block(Block::default())),
                },
                Stmt::Echo(float("2")),
            ]
        );
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let nodes = parse_ok("<?php if (1) if (2) echo 'a'; else echo 'b';");
        if let [Stmt::If { then_branch, else_branch, .. }] = nodes.as_slice() {
            assert_eq!(**else_branch, Stmt::Block(Block::default()));
            assert!(
                matches!(&**then_branch, Stmt::If { else_branch, .. } if **else_branch == echo("'b'"))
            );
        } else {
            panic!("Expected one if, got {:?}", nodes);
        }
    }

    #[test]
    fn test_call_statement() {
        assert_eq!(
            parse_ok("<?php foo(1, 'a', bar());"),
            vec![Stmt::Expr(Expr::Call {
                name: "foo".to_string(),
                args: vec![
                    float("1"),
                    string("'a'"),
                    Expr::Call {
                        name: "bar".to_string(),
                        args: vec![],
                    },
                ],
            })]
        );
    }

    #[test]
    fn test_call_in_assignment() {
        let nodes = parse_ok("<?php $n = strlen($s);");
        assert!(matches!(
            nodes.as_slice(),
            [Stmt::Assignment { value: Expr::Call { name, args }, .. }]
                if name == "strlen" && args == &vec![Expr::Unknown]
        ));
    }

    #[test]
    fn test_call_in_condition() {
        let nodes = parse_ok("<?php if (is_ok(1)) { }");
        assert!(matches!(
            nodes.as_slice(),
            [Stmt::If { condition: Expr::Call { name, .. }, .. }] if name == "is_ok"
        ));
    }

    #[test]
    fn test_expression_keeps_last_literal() {
        assert_eq!(
            parse_ok("<?php $x = $a + 2 . \"s\";"),
            vec![Stmt::Assignment {
                assignee: Identifier::new("x"),
                value: string("\"s\""),
            }]
        );
    }

    #[test]
    fn test_expression_unknown() {
        assert_eq!(
            parse_ok("<?php $x = $y;"),
            vec![Stmt::Assignment {
                assignee: Identifier::new("x"),
                value: Expr::Unknown,
            }]
        );
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(
            parse_ok("<?php if ((1 + (2))) echo false;"),
            vec![Stmt::If {
                condition: float("2"),
                then_branch: Box::new(Stmt::Echo(Expr::Literal(Literal::new(
                    LiteralType::Boolean,
                    "false"
                )))),
                else_branch: Box::new(Stmt::Block(Block::default())),
            }]
        );
    }

    #[test]
    fn test_mixed_html_and_php() {
        assert_eq!(
            parse_ok("<b><?php echo 1; ?></b>"),
            vec![echo("<b>"), Stmt::Echo(float("1")), echo("</b>")]
        );
    }

    #[test]
    fn test_template_text_inside_block() {
        let nodes = parse_ok("<?php if ($a) { ?><i>yes</i><?php } ?>");
        if let [Stmt::If { then_branch, .. }] = nodes.as_slice() {
            assert_eq!(
                **then_branch,
                Stmt::Block(Block {
                    statements: vec![echo("<i>yes</i>")],
                })
            );
        } else {
            panic!("Expected one if, got {:?}", nodes);
        }
    }

    #[test]
    fn test_comments_and_case_are_ignored() {
        assert_eq!(
            parse_ok("<?php\n// greet\nECHO /* loud */ TRUE;\n"),
            vec![Stmt::Echo(Expr::Literal(Literal::new(
                LiteralType::Boolean,
                "TRUE"
            )))]
        );
    }

    #[test]
    fn test_missing_terminator() {
        let (program, errors) = parse("<?php $x = 1 echo 2; ?>");
        assert!(program.nodes.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "found \"echo\", expected ';'");
        assert_eq!(errors[0].line, Some(1));
        assert_eq!(errors[0].offset, Some(13));
    }

    #[test]
    fn test_nodes_before_error_are_kept() {
        let (program, errors) = parse("<?php echo 1;\n$y = 2\n?>\n<p>after</p>");
        assert_eq!(program.nodes, vec![Stmt::Echo(float("1"))]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, Some(3));
    }

    #[test]
    fn test_unexpected_statement() {
        let (program, errors) = parse("<?php ) ?>");
        assert!(program.nodes.is_empty());
        assert_eq!(errors[0].msg, "found \")\", expected statement");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let (_, errors) = parse("<?php echo (1;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "found \";\", expected ')'");
    }

    #[test]
    fn test_unclosed_parenthesis_around_call() {
        let (program, errors) = parse("<?php echo (f();");
        assert!(program.nodes.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "found \";\", expected ')'");

        let nodes = parse_ok("<?php echo ((f(1)));");
        assert!(matches!(
            nodes.as_slice(),
            [Stmt::Echo(Expr::Call { name, args })] if name == "f" && args == &vec![float("1")]
        ));
    }

    #[test]
    fn test_empty_argument_slot() {
        let (program, errors) = parse("<?php f(,);");
        assert!(program.nodes.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "found \",\", expected expression");

        let (_, errors) = parse("<?php f(1,);");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "found \")\", expected expression");
        assert_eq!(errors[0].offset, Some(10));
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(
            parse_ok("<?php $x = 1_000;"),
            vec![Stmt::Assignment {
                assignee: Identifier::new("x"),
                value: float("1_000"),
            }]
        );
    }

    #[test]
    fn test_unclosed_block() {
        let (program, errors) = parse("<?php function f() { echo 1;");
        assert!(program.nodes.is_empty());
        assert_eq!(errors[0].msg, "found EOF, expected statement");
    }

    #[test]
    fn test_bad_parameter_list() {
        let (_, errors) = parse("<?php function f($a $b) {}");
        assert_eq!(errors[0].msg, "found \"$b\", expected ','");
    }

    #[test]
    fn test_bare_name_must_be_call() {
        let (_, errors) = parse("<?php foo;");
        assert_eq!(errors[0].msg, "found \";\", expected '('");
    }

    #[test]
    fn test_lexical_error_is_reported() {
        let (program, errors) = parse("<?php echo 1;\necho \"open");
        assert_eq!(program.nodes, vec![Stmt::Echo(float("1"))]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, "unterminated string");
        assert_eq!(errors[0].line, Some(2));
        assert_eq!(errors[0].offset, Some(19));
    }

    #[test]
    fn test_parser_exposes_errors() {
        let mut parser = Parser::new("<?php else", "page.php");
        let program = parser.parse_program();
        assert!(program.nodes.is_empty());
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(
            parser.errors()[0].to_string(),
            "found \"else\", expected statement at line 1"
        );
    }

    #[test]
    fn test_from_stream() {
        let stream = phparse_lexer::open("<?php echo 'x';", "");
        let mut parser = Parser::from_stream(stream);
        assert_eq!(parser.parse_program().nodes, vec![echo("'x'")]);
    }
}
