#[cfg(test)]
mod scanner_tests {
    use treelox as lox;

    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= :=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::COLON_EQUAL, ":="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_declare_assign_statement() {
        assert_token_sequence(
            "count := 10;",
            &[
                (TokenType::IDENTIFIER, "count"),
                (TokenType::COLON_EQUAL, ":="),
                (TokenType::NUMBER(0.0), "10"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_keywords_and_identifiers() {
        assert_token_sequence(
            "fun var_ print orchid or",
            &[
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "var_"),
                (TokenType::PRINT, "print"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_literal_payloads() {
        let tokens: Vec<Token> = Scanner::new(b"12.5 \"hi there\"")
            .filter_map(Result::ok)
            .collect();

        match &tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 12.5),
            other => panic!("expected number, got {:?}", other),
        }

        match &tokens[1].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hi there"),
            other => panic!("expected string, got {:?}", other),
        }

        assert_eq!(tokens[1].lexeme, "\"hi there\"");
    }

    #[test]
    fn test_scanner_06_token_display() {
        let tokens: Vec<String> = Scanner::new(b"42 1.5 \"s\" x")
            .filter_map(Result::ok)
            .map(|t| t.to_string())
            .collect();

        assert_eq!(
            tokens,
            vec![
                "NUMBER 42 42.0",
                "NUMBER 1.5 1.5",
                "STRING \"s\" s",
                "IDENTIFIER x null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_scanner_07_lines_and_comments() {
        let tokens: Vec<Token> = Scanner::new(b"a // comment ( ) {\nb\n\"multi\nline\" c")
            .filter_map(Result::ok)
            .collect();

        let lines: Vec<(String, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.clone(), t.line))
            .collect();

        assert_eq!(lines[0], ("a".to_string(), 1));
        assert_eq!(lines[1], ("b".to_string(), 2));
        // The string token is reported on the line where it ends.
        assert_eq!(lines[2].1, 4);
        assert_eq!(lines[3], ("c".to_string(), 4));
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source.as_bytes()).collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $",
                "[line 1] Error: Unexpected character: #",
            ]
        );

        fn assert_token_matches(
            result: &lox::error::Result<Token>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_lone_colon_and_unterminated_string() {
        let (tokens, errors) = scan_all(b"a : b \"open");

        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character: :",
                "[line 1] Error: Unterminated string.",
            ]
        );

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["IDENTIFIER", "IDENTIFIER", "EOF"]);
    }

    #[test]
    fn test_multibyte_character_reported_once() {
        let (tokens, errors) = scan_all("print é; 日 x".as_bytes());

        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "[line 1] Error: Unexpected character: é",
                "[line 1] Error: Unexpected character: 日",
            ]
        );

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["PRINT", "SEMICOLON", "IDENTIFIER", "EOF"]);
    }
}
