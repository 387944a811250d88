//! SQL tokenizer using nom.
//!
//! Everything outside single-quoted literals is case-folded to lower case
//! before scanning, so keywords and identifiers are case-insensitive while
//! string contents keep their case.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map, recognize},
    sequence::{delimited, pair},
    IResult,
};

use crate::error::{DalError, DalResult};

/// Reserved words recognised by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Distinct,
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Substr,
    Greatest,
    Decode,
    Concat,
    Select,
    Update,
    Insert,
    Delete,
    From,
    Where,
    Having,
    By,
    Order,
    For,
    Asc,
    Desc,
    And,
    Or,
    Into,
    Values,
    Set,
    Is,
    Null,
    Not,
    Like,
    Left,
    Right,
    On,
    In,
    Join,
}

impl Keyword {
    pub const ALL: [Keyword; 36] = [
        Keyword::Distinct,
        Keyword::Count,
        Keyword::Sum,
        Keyword::Min,
        Keyword::Max,
        Keyword::Avg,
        Keyword::Substr,
        Keyword::Greatest,
        Keyword::Decode,
        Keyword::Concat,
        Keyword::Select,
        Keyword::Update,
        Keyword::Insert,
        Keyword::Delete,
        Keyword::From,
        Keyword::Where,
        Keyword::Having,
        Keyword::By,
        Keyword::Order,
        Keyword::For,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::And,
        Keyword::Or,
        Keyword::Into,
        Keyword::Values,
        Keyword::Set,
        Keyword::Is,
        Keyword::Null,
        Keyword::Not,
        Keyword::Like,
        Keyword::Left,
        Keyword::Right,
        Keyword::On,
        Keyword::In,
        Keyword::Join,
    ];

    /// Look up a lower-case word in the keyword table.
    pub fn from_word(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|k| k.as_str() == word)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Distinct => "distinct",
            Keyword::Count => "count",
            Keyword::Sum => "sum",
            Keyword::Min => "min",
            Keyword::Max => "max",
            Keyword::Avg => "avg",
            Keyword::Substr => "substr",
            Keyword::Greatest => "greatest",
            Keyword::Decode => "decode",
            Keyword::Concat => "concat",
            Keyword::Select => "select",
            Keyword::Update => "update",
            Keyword::Insert => "insert",
            Keyword::Delete => "delete",
            Keyword::From => "from",
            Keyword::Where => "where",
            Keyword::Having => "having",
            Keyword::By => "by",
            Keyword::Order => "order",
            Keyword::For => "for",
            Keyword::Asc => "asc",
            Keyword::Desc => "desc",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Into => "into",
            Keyword::Values => "values",
            Keyword::Set => "set",
            Keyword::Is => "is",
            Keyword::Null => "null",
            Keyword::Not => "not",
            Keyword::Like => "like",
            Keyword::Left => "left",
            Keyword::Right => "right",
            Keyword::On => "on",
            Keyword::In => "in",
            Keyword::Join => "join",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Word,
    Number,
    QuotedString,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Dot,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Comma,
}

/// A scanned token. `position` is the byte offset into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Lower-case everything outside single-quoted literals.
///
/// An unterminated quote lower-cases the remainder as well.
pub fn fold_case(sql: &str) -> String {
    let mut folded = String::with_capacity(sql.len());
    let mut rest = sql;

    while let Some(open) = rest.find('\'') {
        let Some(len) = rest[open + 1..].find('\'') else {
            break;
        };
        let close = open + 1 + len;
        folded.push_str(&rest[..open].to_ascii_lowercase());
        folded.push_str(&rest[open..=close]);
        rest = &rest[close + 1..];
    }

    folded.push_str(&rest.to_ascii_lowercase());
    folded
}

/// Scan a SQL statement into tokens.
pub fn tokenize(sql: &str) -> DalResult<Vec<Token>> {
    let folded = fold_case(sql);
    let mut tokens = Vec::new();
    let mut input = folded.as_str();

    loop {
        let rest = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok((rest, _)) => rest,
            Err(_) => input,
        };
        if rest.is_empty() {
            break;
        }

        let position = folded.len() - rest.len();
        match scan_token(rest) {
            Ok((remaining, (kind, text))) => {
                tokens.push(Token {
                    kind,
                    text: text.to_string(),
                    position,
                });
                input = remaining;
            }
            Err(_) => {
                let character = rest.chars().next().unwrap_or_default();
                return Err(DalError::lex(position, character));
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized statement");
    Ok(tokens)
}

fn scan_token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((parse_quoted_string, parse_number, parse_word, parse_punctuation))(input)
}

/// Quoted string, quotes included. No escapes.
fn parse_quoted_string(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(
        recognize(delimited(char('\''), take_while(|c| c != '\''), char('\''))),
        |s| (TokenKind::QuotedString, s),
    )(input)
}

fn parse_number(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(digit1, |s| (TokenKind::Number, s))(input)
}

/// Identifier or keyword.
fn parse_word(input: &str) -> IResult<&str, (TokenKind, &str)> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
        |s: &str| {
            let kind = Keyword::from_word(s).map_or(TokenKind::Word, TokenKind::Keyword);
            (kind, s)
        },
    )(input)
}

/// Punctuation, two-character operators first.
fn parse_punctuation(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((
        map(tag("<>"), |s| (TokenKind::NotEqual, s)),
        map(tag(">="), |s| (TokenKind::GreaterEq, s)),
        map(tag("<="), |s| (TokenKind::LessEq, s)),
        map(tag("<"), |s| (TokenKind::Less, s)),
        map(tag(">"), |s| (TokenKind::Greater, s)),
        map(tag("="), |s| (TokenKind::Equal, s)),
        map(tag("+"), |s| (TokenKind::Plus, s)),
        map(tag("-"), |s| (TokenKind::Minus, s)),
        map(tag("*"), |s| (TokenKind::Star, s)),
        map(tag("/"), |s| (TokenKind::Slash, s)),
        map(tag("("), |s| (TokenKind::LParen, s)),
        map(tag(")"), |s| (TokenKind::RParen, s)),
        map(tag("."), |s| (TokenKind::Dot, s)),
        map(tag(","), |s| (TokenKind::Comma, s)),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_fold_case_keeps_quoted_text() {
        assert_eq!(
            fold_case("SELECT Foo.Bar FROM Foo WHERE Foo.Bar = 'MiXeD' AND X.Y = 'Z'"),
            "select foo.bar from foo where foo.bar = 'MiXeD' and x.y = 'Z'"
        );
    }

    #[test]
    fn test_fold_case_unterminated_quote() {
        assert_eq!(fold_case("A = 'B"), "a = 'b");
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            kinds("select foo.bar from foo"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Word,
                TokenKind::Dot,
                TokenKind::Word,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Word,
            ]
        );
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("<> >= <= < > ="),
            vec![
                TokenKind::NotEqual,
                TokenKind::GreaterEq,
                TokenKind::LessEq,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Equal,
            ]
        );
    }

    #[test]
    fn test_literals_and_positions() {
        let tokens = tokenize("x.y = 'Hello World'\n and 42").unwrap();
        assert_eq!(tokens[4].kind, TokenKind::QuotedString);
        assert_eq!(tokens[4].text, "'Hello World'");
        assert_eq!(tokens[4].position, 6);
        assert_eq!(tokens[5].kind, TokenKind::Keyword(Keyword::And));
        assert_eq!(tokens[6].kind, TokenKind::Number);
        assert_eq!(tokens[6].text, "42");
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let tokens = tokenize("SeLeCt DISTINCT").unwrap();
        assert!(tokens[0].is_keyword(Keyword::Select));
        assert!(tokens[1].is_keyword(Keyword::Distinct));
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let tokens = tokenize("_carton_dtl2").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "_carton_dtl2");
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize("select foo.bar % foo").unwrap_err();
        assert!(matches!(
            err,
            DalError::Lex {
                position: 15,
                character: '%'
            }
        ));
    }

    #[test]
    fn test_unterminated_string_is_lex_error() {
        let err = tokenize("a.b = 'oops").unwrap_err();
        assert!(matches!(err, DalError::Lex { position: 6, character: '\'' }));
    }

    #[test]
    fn test_keyword_table_round_trips() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_word(keyword.as_str()), Some(keyword));
        }
        assert_eq!(Keyword::from_word("carton"), None);
    }
}
