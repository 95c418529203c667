use std::{io, net::SocketAddr};

use statusboard::shutdown::ShutdownController;
use statusboard::AppState;
use tokio::{net::TcpListener, task::JoinHandle};

/// テスト用に起動したステータスボードサーバー
pub struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownController,
    handle: JoinHandle<Result<(), io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// パスからURLを組み立てる
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(self) {
        self.shutdown.request_shutdown();
        let _ = self.handle.await;
    }
}

/// ランダムポートでサーバーを起動する
///
/// 停止は`state.shutdown`経由で行う。
pub async fn spawn_status_board(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("failed to read local addr");
    let shutdown = state.shutdown.clone();

    let handle = tokio::spawn(statusboard::server::serve(state, listener));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
