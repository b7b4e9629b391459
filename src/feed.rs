use tungstenite::Message;

use crate::board::Board;
use crate::error::FeedError;
use crate::protocol::BoardMessage;
use crate::render::Renderer;
use crate::svg::SvgSurface;

/// Follows a websocket board feed and repaints after every board message.
///
/// The grid is painted once; each frame is the grid plus a full `redraw` of
/// the received board, handed to `on_frame` as an SVG document. Messages that
/// are not boards are skipped. Returns the number of frames once the server
/// closes the connection.
pub fn watch<F>(url: &str, renderer: &Renderer, mut on_frame: F) -> Result<usize, FeedError>
where
    F: FnMut(&Board, String),
{
    let (mut socket, response) = tungstenite::connect(url)?;
    log::info!("Connected to {}, status {}", url, response.status());

    let mut grid = SvgSurface::for_geometry(renderer.geometry());
    renderer.draw_grid_lines(&mut grid);

    let mut frames = 0;
    loop {
        let msg = match socket.read() {
            Ok(m) => m,
            Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                log::debug!("Connection closed");
                break;
            }
            Err(e) => {
                log::error!("Cannot read websocket, error: {}", e);
                return Err(e.into());
            }
        };
        match msg {
            Message::Text(m) => match serde_json::from_str::<BoardMessage>(&m) {
                Ok(decoded) => {
                    let board = decoded.into_board();
                    let mut frame = grid.clone();
                    renderer.redraw(&mut frame, &board);
                    frames += 1;
                    log::debug!("Frame {}:\n{}", frames, board);
                    on_frame(&board, frame.finish());
                }
                Err(e) => log::debug!("Skipping message that is not a board: {}", e),
            },
            Message::Binary(_) => { log::debug!("binary msg"); }
            Message::Ping(_) => { log::debug!("ping msg"); }
            Message::Pong(_) => { log::debug!("pong msg"); }
            Message::Close(_) => {
                log::debug!("Closing websocket");
                if let Err(e) = socket.flush() {
                    log::debug!("Close reply not delivered: {}", e);
                }
                break;
            }
            Message::Frame(_) => { log::debug!("frame msg"); }
        }
    }
    Ok(frames)
}
