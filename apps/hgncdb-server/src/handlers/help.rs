const HELP: &str = "
These are the routes for hgncdb.

post data to the database
   /data (POST)                                   Fetch the HGNC dataset and load it into the database
   /image?start=year&end=year (POST)              Plot approvals per year between start and end and store the image

retrieve elements from the data in the database
   /data (GET)                                    Return all the data in the database
   /genes (GET)                                   Return a list of all HGNC IDs
   /genes/<hgnc_id> (GET)                         Return all of the information for a specified HGNC ID
   /image (GET)                                   Return the stored image
   /imagedata (GET)                               Return the data used to generate the image from the /image route
   /when/<hgnc_id> (GET)                          Return dates of approval or modification for a specified HGNC ID
   /locusdata (GET)                               Return the number of entries in each locus group
   /locus/<hgnc_id> (GET)                         Return the locus group of a specified HGNC ID

delete data from the database
   /data (DELETE)                                 Delete the data from the database
   /image (DELETE)                                Delete the image from the database

get help
   /help (GET)                                    Return help text for the user
";

/// GET /help
pub async fn help() -> &'static str {
    HELP
}
