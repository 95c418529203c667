use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 指定のステータスコードと遅延で応答するサイトを起動する
pub async fn mock_site(status: u16, delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_delay(delay))
        .mount(&server)
        .await;
    server
}

/// サイト一覧ファイルを書き出す
pub fn write_sites_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create sites file");
    for line in lines {
        writeln!(file, "{}", line).expect("failed to write sites file");
    }
    file.flush().expect("failed to flush sites file");
    file
}
