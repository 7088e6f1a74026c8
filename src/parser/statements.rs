//! Statement parsing implementation
//!
//! Each statement form is validated and translated to C in one step:
//!
//! - `PRINT "text"` / `PRINT expr` → `printf(...)`
//! - `IF cmp THEN ... ENDIF` → `if(cmp){ ... }`
//! - `WHILE cmp REPEAT ... ENDWHILE` → `while(cmp){ ... }`
//! - `LABEL name` / `GOTO name` → `l_name:;` / `goto l_name;`
//! - `LET name = expr` → `v_name = expr;`
//! - `INPUT name` → guarded `scanf`
//!
//! Variables and labels are prefixed in C (`v_`, `l_`) so that source names
//! such as `int` or `printf` cannot collide with C. Every statement must be
//! followed by at least one newline.

use crate::errors::CompileError;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{c_label, c_variable, Parser};

impl Parser<'_> {
    /// Parse a statement and its terminating newline(s)
    pub(crate) fn statement(&mut self) -> Result<(), CompileError> {
        match self.current.kind {
            TokenKind::Print => self.print_statement()?,
            TokenKind::If => self.if_statement()?,
            TokenKind::While => self.while_statement()?,
            TokenKind::Label => self.label_statement()?,
            TokenKind::Goto => self.goto_statement()?,
            TokenKind::Let => self.let_statement()?,
            TokenKind::Input => self.input_statement()?,
            found => {
                return Err(CompileError::InvalidStatement {
                    found,
                    text: self.current.text.clone(),
                    location: self.current.location,
                });
            }
        }

        self.nl()
    }

    fn print_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;

        if self.check(TokenKind::String) {
            let text = self.expect(TokenKind::String)?.text;
            self.emitter.emit_line(&format!("printf(\"{}\\n\");", text));
        } else {
            self.emitter.emit("printf(\"%.2f\\n\", (double)(");
            self.expression()?;
            self.emitter.emit_line("));");
        }

        Ok(())
    }

    fn if_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        self.emitter.emit("if(");
        self.comparison()?;

        self.expect(TokenKind::Then)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndIf) {
            self.statement()?;
        }

        self.expect(TokenKind::EndIf)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    fn while_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        self.emitter.emit("while(");
        self.comparison()?;

        self.expect(TokenKind::Repeat)?;
        self.nl()?;
        self.emitter.emit_line("){");

        while !self.check(TokenKind::EndWhile) {
            self.statement()?;
        }

        self.expect(TokenKind::EndWhile)?;
        self.emitter.emit_line("}");
        Ok(())
    }

    fn label_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        let label = self.expect(TokenKind::Ident)?;

        if let Some(first) = self.labels_declared.get(&label.text) {
            return Err(CompileError::DuplicateLabel {
                name: label.text,
                first: *first,
                location: label.location,
            });
        }

        // The null statement lets a label close a block in C
        self.emitter.emit_line(&format!("{}:;", c_label(&label.text)));
        self.labels_declared.insert(label.text, label.location);
        Ok(())
    }

    fn goto_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        let label = self.expect(TokenKind::Ident)?;

        self.emitter
            .emit_line(&format!("goto {};", c_label(&label.text)));
        self.labels_gotoed
            .entry(label.text)
            .or_insert(label.location);
        Ok(())
    }

    fn let_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.declare(&name);

        self.emitter.emit(&format!("{} = ", c_variable(&name)));
        self.expect(TokenKind::Eq)?;
        self.expression()?;
        self.emitter.emit_line(";");
        Ok(())
    }

    fn input_statement(&mut self) -> Result<(), CompileError> {
        self.advance()?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.declare(&name);

        let var = c_variable(&name);

        // On a non-numeric line, zero the variable and discard the bad input
        self.emitter
            .emit_line(&format!("if(0 == scanf(\"%lf\", &{})) {{", var));
        self.emitter.emit_line(&format!("{} = 0;", var));
        self.emitter.emit_line("scanf(\"%*s\");");
        self.emitter.emit_line("}");
        Ok(())
    }

    /// nl ::= NEWLINE+
    pub(crate) fn nl(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Newline)?;
        while self.check(TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;
    use crate::errors::CompileError;
    use crate::parser::lexer::TokenKind;

    /// Strip the prologue, variable declarations and epilogue, leaving the
    /// translated statements.
    fn body(source: &str) -> String {
        let out = compile(source).unwrap();
        let mut rest = out
            .strip_prefix("#include <stdio.h>\nint main(void){\n")
            .unwrap();
        while rest.starts_with("double ") {
            let eol = rest.find('\n').unwrap();
            rest = &rest[eol + 1..];
        }
        rest.strip_suffix("return 0;\n}\n").unwrap().to_string()
    }

    #[test]
    fn test_print_string() {
        assert_eq!(body("PRINT \"hello\""), "printf(\"hello\\n\");\n");
    }

    #[test]
    fn test_print_expression() {
        assert_eq!(
            body("PRINT 1 + 2 * 3"),
            "printf(\"%.2f\\n\", (double)(1.0 + 2.0 * 3.0));\n"
        );
    }

    #[test]
    fn test_if_block() {
        let out = body("LET a = 1\nIF a == 1 THEN\nPRINT \"one\"\nENDIF\n");
        assert_eq!(
            out,
            "v_a = 1.0;\nif(v_a == 1.0){\nprintf(\"one\\n\");\n}\n"
        );
    }

    #[test]
    fn test_empty_while_body() {
        let out = body("LET a = 0\nWHILE a < 1 REPEAT\nENDWHILE\n");
        assert_eq!(out, "v_a = 0.0;\nwhile(v_a < 1.0){\n}\n");
    }

    #[test]
    fn test_nested_blocks() {
        let source = r#"
LET i = 0
WHILE i < 3 REPEAT
    IF i != 1 THEN
        PRINT i
    ENDIF
    LET i = i + 1
ENDWHILE
"#;
        let out = body(source);
        assert_eq!(
            out,
            "v_i = 0.0;\n\
             while(v_i < 3.0){\n\
             if(v_i != 1.0){\n\
             printf(\"%.2f\\n\", (double)(v_i));\n\
             }\n\
             v_i = v_i + 1.0;\n\
             }\n"
        );
    }

    #[test]
    fn test_label_and_goto() {
        let out = body("LABEL top\nGOTO top\n");
        assert_eq!(out, "l_top:;\ngoto l_top;\n");
    }

    #[test]
    fn test_input_declares_and_guards_scanf() {
        let out = compile("INPUT n\nPRINT n\n").unwrap();
        assert!(out.contains("double v_n;\n"));
        assert!(out.contains(
            "if(0 == scanf(\"%lf\", &v_n)) {\nv_n = 0;\nscanf(\"%*s\");\n}\n"
        ));
    }

    #[test]
    fn test_c_keywords_as_names() {
        let out = body("LET int = 1\nINPUT printf\nLABEL return\nGOTO return\nPRINT int + printf\n");
        assert_eq!(
            out,
            "v_int = 1.0;\n\
             if(0 == scanf(\"%lf\", &v_printf)) {\n\
             v_printf = 0;\n\
             scanf(\"%*s\");\n\
             }\n\
             l_return:;\n\
             goto l_return;\n\
             printf(\"%.2f\\n\", (double)(v_int + v_printf));\n"
        );
    }

    #[test]
    fn test_let_may_reference_itself_on_first_assignment() {
        assert!(compile("LET a = a").is_ok());
    }

    #[test]
    fn test_invalid_statement() {
        match compile("LET a = 1\na = 2\n") {
            Err(CompileError::InvalidStatement { found, text, location }) => {
                assert_eq!(found, TokenKind::Ident);
                assert_eq!(text, "a");
                assert_eq!(location.line, 2);
            }
            other => panic!("Expected InvalidStatement, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_requires_newline() {
        match compile("PRINT 1 PRINT 2") {
            Err(CompileError::UnexpectedToken { expected, found, .. }) => {
                assert_eq!(expected, TokenKind::Newline);
                assert_eq!(found, TokenKind::Print);
            }
            other => panic!("Expected UnexpectedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_endif() {
        match compile("LET a = 1\nIF a > 0 THEN\nPRINT a\n") {
            Err(CompileError::InvalidStatement { found, .. }) => {
                assert_eq!(found, TokenKind::Eof);
            }
            other => panic!("Expected InvalidStatement, got {:?}", other),
        }
    }

    #[test]
    fn test_then_must_end_line() {
        assert!(matches!(
            compile("LET a = 1\nIF a > 0 THEN PRINT a\nENDIF\n"),
            Err(CompileError::UnexpectedToken {
                expected: TokenKind::Newline,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_label() {
        match compile("LABEL x\nPRINT 1\nLABEL x\n") {
            Err(CompileError::DuplicateLabel { name, first, location }) => {
                assert_eq!(name, "x");
                assert_eq!(first.line, 1);
                assert_eq!(location.line, 3);
            }
            other => panic!("Expected DuplicateLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_label_requires_identifier() {
        assert!(matches!(
            compile("LABEL 10\n"),
            Err(CompileError::UnexpectedToken {
                expected: TokenKind::Ident,
                found: TokenKind::Number,
                ..
            })
        ));
    }
}
