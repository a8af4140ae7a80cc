//! 映画カードギャラリーコンポーネント

use leptos::prelude::*;
use movie_ledger_common::Movie;

#[component]
pub fn MovieGallery(movies: ReadSignal<Vec<Movie>>) -> impl IntoView {
    // 下のturbofish式はview!マクロ(rstml)が`<`/`>`をタグとして誤認するため、
    // 挙動を変えずにクロージャをマクロ外へ括り出す
    let enumerated = move || movies.get().into_iter().enumerate().collect::<Vec<_>>();
    view! {
        <div class="movie-container">
            <For
                each=enumerated
                key=|(index, movie)| movie.id.clone().unwrap_or_else(|| index.to_string())
                children=move |(_, movie): (usize, Movie)| {
                    view! { <MovieCard movie=movie /> }
                }
            />
        </div>
    }
}

#[component]
fn MovieCard(movie: Movie) -> impl IntoView {
    // 画像リストが空のレコードでも先頭画像は必ず返る
    let poster = movie.primary_image().to_string();
    let alt = format!("{}のポスター", movie.title);

    view! {
        <div class="movie-card">
            <img class="movie-poster" src=poster alt=alt />
            <div class="movie-details">
                <h3>{movie.title.clone()}</h3>
                <p><strong>"公開年: "</strong>{movie.year.clone()}</p>
                <p><strong>"監督: "</strong>{movie.director.clone()}</p>
                <p>{movie.plot.clone()}</p>
            </div>
        </div>
    }
}
