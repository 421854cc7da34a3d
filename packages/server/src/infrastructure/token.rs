//! Random session token generation.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::domain::{Token, TokenGenerator};

/// Number of random bytes per token (128 bits)
pub const TOKEN_SIZE: usize = 16;

/// Generates tokens from the thread-local CSPRNG, encoded URL-safe base64 without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> Token {
        let mut bytes = [0u8; TOKEN_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Token::new(URL_SAFE_NO_PAD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_has_expected_length_and_alphabet() {
        // テスト項目: トークンは 16 バイトを URL セーフな base64（パディングなし）で表現した 22 文字
        // given (前提条件):
        let generator = RandomTokenGenerator;

        // when (操作):
        let token = generator.generate();

        // then (期待する結果):
        assert_eq!(token.as_str().len(), 22);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        // テスト項目: 連続して生成したトークンが重複しない
        // given (前提条件):
        let generator = RandomTokenGenerator;

        // when (操作):
        let tokens: HashSet<String> = (0..1_000)
            .map(|_| generator.generate().as_str().to_string())
            .collect();

        // then (期待する結果):
        assert_eq!(tokens.len(), 1_000);
    }
}
