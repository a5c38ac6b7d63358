mod filter_list_fetcher;

pub use filter_list_fetcher::ReqwestFilterListFetcher;
