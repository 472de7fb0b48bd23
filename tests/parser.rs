#[cfg(test)]
mod parser_tests {
    use treelox as lox;

    use lox::ast_printer::AstPrinter;
    use lox::expr::Expr;
    use lox::parser::{Parsed, Parser};
    use lox::scanner::scan_all;
    use lox::stmt::Stmt;

    fn parse(source: &str) -> Parsed {
        let (tokens, lex_errors) = scan_all(source.as_bytes());
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

        Parser::new(&tokens).parse()
    }

    /// Prefix rendering of every statement; panics on syntax errors.
    fn print_ok(source: &str) -> Vec<String> {
        let parsed = parse(source);
        let errors: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        parsed.statements.iter().map(AstPrinter::print_stmt).collect()
    }

    fn error_messages(parsed: &Parsed) -> Vec<String> {
        parsed.errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(
            print_ok("1 + 2 * 3 - 4 / 2;"),
            vec!["(; (- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0)))"]
        );
        assert_eq!(print_ok("!-1;"), vec!["(; (! (- 1.0)))"]);
        assert_eq!(
            print_ok("1 < 2 == 3 >= 4;"),
            vec!["(; (== (< 1.0 2.0) (>= 3.0 4.0)))"]
        );
        assert_eq!(print_ok("(1 + 2) * 3;"), vec!["(; (* (group (+ 1.0 2.0)) 3.0))"]);
    }

    #[test]
    fn test_logical_operators_bind_looser_than_equality() {
        assert_eq!(
            print_ok("a or b and c == d;"),
            vec!["(; (or a (and b (== c d))))"]
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(print_ok("a = b = 1;"), vec!["(; (= a (= b 1.0)))"]);
    }

    #[test]
    fn test_calls_chain() {
        assert_eq!(
            print_ok("f(1)(2, \"x\");"),
            vec!["(; (call (call f 1.0) 2.0 x))"]
        );
        assert_eq!(print_ok("f();"), vec!["(; (call f))"]);
    }

    #[test]
    fn test_var_and_declare_assign_produce_same_node() {
        assert_eq!(
            print_ok("var a = 1; var b; c := a + 1;"),
            vec!["(var a 1.0)", "(var b)", "(var c (+ a 1.0))"]
        );

        let parsed = parse("c := 1;");
        assert!(matches!(parsed.statements[0], Stmt::Var { .. }));
    }

    #[test]
    fn test_identifier_without_declare_assign_is_rewound() {
        assert_eq!(
            print_ok("x; x = 2; x(1);"),
            vec!["(; x)", "(; (= x 2.0))", "(; (call x 1.0))"]
        );
    }

    #[test]
    fn test_control_flow_statements() {
        assert_eq!(
            print_ok("if (a) print 1; else { print 2; }"),
            vec!["(if a (print 1.0) (block (print 2.0)))"]
        );
        assert_eq!(print_ok("if (a) print 1;"), vec!["(if a (print 1.0))"]);
        assert_eq!(
            print_ok("while (i < 3) i = i + 1;"),
            vec!["(while (< i 3.0) (; (= i (+ i 1.0))))"]
        );
    }

    #[test]
    fn test_for_loop_is_desugared() {
        assert_eq!(
            print_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec!["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );
    }

    #[test]
    fn test_for_loop_with_omitted_clauses() {
        assert_eq!(print_ok("for (;;) print 1;"), vec!["(while true (print 1.0))"]);
        assert_eq!(
            print_ok("for (i = 0; ; ) print i;"),
            vec!["(block (; (= i 0.0)) (while true (print i)))"]
        );
    }

    #[test]
    fn test_function_declaration_and_return() {
        assert_eq!(
            print_ok("fun add(a, b) { return a + b; } fun nop() { return; }"),
            vec![
                "(fun add(a b) (return (+ a b)))",
                "(fun nop() (return))",
            ]
        );

        let parsed = parse("fun add(a, b) { return a + b; }");
        let Stmt::Function(decl) = &parsed.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(decl.name.lexeme, "add");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.body.len(), 1);
    }

    #[test]
    fn test_missing_semicolon_reports_at_end() {
        let parsed = parse("print 1");

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at end: Expect ';' after value."]
        );
        assert!(parsed.statements.is_empty());
    }

    #[test]
    fn test_recovery_reports_each_bad_statement_once() {
        let parsed = parse("var = 1;\nprint 2;\n1 +;\nprint 3;");

        assert_eq!(
            error_messages(&parsed),
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect expression.",
            ]
        );

        let printed: Vec<String> = parsed.statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(print 2.0)", "(print 3.0)"]);
    }

    #[test]
    fn test_recovery_stops_at_statement_keyword() {
        let parsed = parse("print 1 2 3 var y = 4; print y;");

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at '2': Expect ';' after value."]
        );

        let printed: Vec<String> = parsed.statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(var y 4.0)", "(print y)"]);
    }

    #[test]
    fn test_recovery_inside_block_keeps_block() {
        let parsed = parse("{ var = 1; print 2; }");

        assert_eq!(parsed.errors.len(), 1);

        let printed: Vec<String> = parsed.statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(block (print 2.0))"]);
    }

    #[test]
    fn test_invalid_assignment_target_is_not_fatal() {
        let parsed = parse("1 = 2; print 3;");

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(parsed.statements.len(), 2);
        assert!(matches!(
            parsed.statements[0],
            Stmt::Expression(Expr::Literal(_))
        ));
    }

    #[test]
    fn test_too_many_parameters_is_reported_but_parsed() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let parsed = parse(&source);

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
        );

        let Stmt::Function(decl) = &parsed.statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(decl.params.len(), 256);
    }

    #[test]
    fn test_too_many_arguments_is_reported_but_parsed() {
        let args: Vec<&str> = vec!["0"; 256];
        let source = format!("f({});", args.join(", "));

        let parsed = parse(&source);

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at '0': Can't have more than 255 arguments."]
        );
        assert_eq!(parsed.statements.len(), 1);
    }

    #[test]
    fn test_exactly_255_arguments_is_fine() {
        let args: Vec<&str> = vec!["0"; 255];
        let source = format!("f({});", args.join(", "));

        assert!(!parse(&source).has_errors());
    }

    #[test]
    fn test_return_outside_function() {
        let parsed = parse("return 1;");

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn test_unclosed_block() {
        let parsed = parse("{ print 1;");

        assert_eq!(
            error_messages(&parsed),
            vec!["[line 1] Error at end: Expect '}' after block."]
        );
    }
}
