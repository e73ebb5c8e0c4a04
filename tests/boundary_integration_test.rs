#![cfg(unix)]

use text_boundary::domain::ports::LocaleProvider;
use text_boundary::{
    BoundaryError, BoundaryOperation, BoundaryTextPolicy, ByteValue, CommandSpec, EnvLocale,
    Encoding, FixedLocale, ImplicitConversion, Representation, TextValue, TokioProcessRunner,
};

const MESSAGE: &str = "汉语/漢語";

fn echo() -> CommandSpec {
    CommandSpec::new("echo")
}

fn cat() -> CommandSpec {
    CommandSpec::new("cat").arg("-")
}

fn policy(locale: &dyn LocaleProvider) -> BoundaryTextPolicy<TokioProcessRunner> {
    BoundaryTextPolicy::new(TokioProcessRunner::new(), locale)
}

#[test]
fn test_utf8_round_trip_identity() {
    let enc = Encoding::utf8();
    let text = TextValue::from(MESSAGE);
    assert_eq!(enc.decode(&enc.encode(&text).unwrap()).unwrap(), text);
}

#[test]
fn test_exception_correct() {
    let policy = policy(&FixedLocale::none());
    let error = policy.raise_error_with_message(TextValue::from(MESSAGE));
    assert_eq!(error.render_text(), MESSAGE);

    let as_result: Result<(), Box<dyn std::error::Error>> = Err(Box::new(error));
    assert_eq!(as_result.unwrap_err().to_string(), MESSAGE);
}

#[test]
fn test_exception_incorrect() {
    let policy = policy(&FixedLocale::none());

    // 文字訊息無法以預設編碼輸出位元組
    let error = policy.raise_error_with_message(TextValue::from(MESSAGE));
    let failure = error.render_bytes(&Encoding::legacy_default()).unwrap_err();
    assert!(matches!(failure, BoundaryError::EncodingError { .. }));

    // 多餘的編碼只會得到跳脫字串
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let error = policy.raise_error_with_message(bytes);
    let rendered = error.render_text();
    assert!(rendered.as_str().starts_with("b'"));
    assert_ne!(rendered, MESSAGE);
    assert!(matches!(
        error.render_bytes(&Encoding::utf8()),
        Err(BoundaryError::RepresentationTypeError { .. })
    ));
}

#[tokio::test]
async fn test_execute_argument_correct() {
    let policy = policy(&EnvLocale::new());
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let status = policy.spawn_with_argument(&echo(), bytes).await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn test_execute_argument_incorrect_forbidden() {
    let policy = policy(&EnvLocale::new());
    let err = policy
        .spawn_with_argument(&echo(), TextValue::from(MESSAGE))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BoundaryError::RepresentationTypeError {
            operation: BoundaryOperation::SpawnProcessArgument,
            expected: Representation::Bytes,
            found: Representation::Text,
        }
    ));
}

#[tokio::test]
async fn test_execute_argument_incorrect_depends_on_locale() {
    let policy = policy(&EnvLocale::new()).with_implicit_conversion(ImplicitConversion::Locale);
    let outcome = policy
        .spawn_with_argument(&echo(), TextValue::from(MESSAGE))
        .await;

    if policy.ambient_is_utf8() {
        // UTF-8 語系下隱式轉換剛好成功
        assert!(outcome.is_ok());
    } else {
        assert!(matches!(
            outcome,
            Err(BoundaryError::RepresentationTypeError { .. })
        ));
    }
}

#[tokio::test]
async fn test_execute_argument_incorrect_under_fixed_locales() {
    let utf8 = policy(&FixedLocale::new("UTF-8")).with_implicit_conversion(ImplicitConversion::Locale);
    assert!(utf8
        .spawn_with_argument(&echo(), TextValue::from(MESSAGE))
        .await
        .is_ok());

    let latin1 =
        policy(&FixedLocale::new("ISO-8859-1")).with_implicit_conversion(ImplicitConversion::Locale);
    assert!(latin1
        .spawn_with_argument(&echo(), TextValue::from(MESSAGE))
        .await
        .is_err());
}

#[tokio::test]
async fn test_execute_stdin_incorrect() {
    for locale in [FixedLocale::new("UTF-8"), FixedLocale::new("ISO-8859-1"), FixedLocale::none()] {
        let policy = policy(&locale).with_implicit_conversion(ImplicitConversion::Locale);
        let err = policy
            .write_stdin(&cat(), TextValue::from(MESSAGE))
            .await
            .unwrap_err();
        assert!(err.is_encoding_class(), "unexpected error: {err:?}");
    }
}

#[tokio::test]
async fn test_execute_stdin_correct() {
    let policy = policy(&EnvLocale::new());
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let status = policy.write_stdin(&cat(), bytes).await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn test_execute_stdout_incorrect() {
    let policy = policy(&EnvLocale::new());
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let captured = policy.read_stdout_stderr(&cat(), bytes).await.unwrap();

    // 輸出是位元組，不是文字
    assert_eq!(captured.stdout_value().representation(), Representation::Bytes);
    assert_eq!(captured.stderr_value().representation(), Representation::Bytes);
    assert!(policy
        .expect_text(BoundaryOperation::ReadProcessStdout, captured.stdout_value())
        .is_err());
    assert!(policy
        .expect_text(BoundaryOperation::ReadProcessStderr, captured.stderr_value())
        .is_err());
}

#[tokio::test]
async fn test_execute_stdout_correct() {
    let policy = policy(&EnvLocale::new());
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let captured = policy.read_stdout_stderr(&cat(), bytes).await.unwrap();

    let decoded = captured.decode(&Encoding::utf8()).unwrap();
    assert_eq!(decoded.stdout, MESSAGE);
    assert_eq!(decoded.stderr, "");
    assert_eq!(captured.exit_code, Some(0));
}

#[tokio::test]
async fn test_stdout_with_invalid_utf8_fails_to_decode() {
    let policy = policy(&FixedLocale::none());
    let captured = policy
        .read_stdout_stderr(&cat(), ByteValue::new(vec![0xff, 0xfe, b'a']))
        .await
        .unwrap();
    assert_eq!(captured.stdout.as_bytes(), &[0xff, 0xfe, b'a']);
    assert!(policy.decode_output(&captured).unwrap_err().is_encoding_class());
}

#[tokio::test]
async fn test_failing_command_status_is_returned() {
    let policy = policy(&FixedLocale::none());
    let bytes = policy.encode(&TextValue::from(MESSAGE)).unwrap();
    let status = policy
        .spawn_with_argument(&CommandSpec::new("false"), bytes)
        .await
        .unwrap();
    assert!(!status.success());
    assert_eq!(status.code(), Some(1));
}
